//! Order orchestrator driving the placement pipeline.

use common::{LineItem, OrderId, TraceContext, UserId};

use crate::error::OrchestrationError;
use crate::services::{InventoryService, NotificationService, OrderService};
use crate::steps::Step;

/// Input to one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub user_id: UserId,
    pub items: Vec<LineItem>,
    pub email: String,
}

/// A run where every step succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    /// Trace the run belonged to, `"unknown"` if none.
    pub trace_id: String,
}

/// Places orders by calling inventory, order and notification services in turn.
///
/// Each step runs only after its predecessor succeeded; the first failure
/// ends the run. Nothing is retried and nothing already done is undone: a
/// reservation stays in place when order creation fails, and a created
/// order stays in place when the notification fails.
pub struct OrderOrchestrator<I, O, N>
where
    I: InventoryService,
    O: OrderService,
    N: NotificationService,
{
    inventory: I,
    orders: O,
    notifications: N,
}

impl<I, O, N> OrderOrchestrator<I, O, N>
where
    I: InventoryService,
    O: OrderService,
    N: NotificationService,
{
    /// Creates a new orchestrator.
    pub fn new(inventory: I, orders: O, notifications: N) -> Self {
        Self {
            inventory,
            orders,
            notifications,
        }
    }

    /// Runs the placement pipeline for one request.
    ///
    /// Both outcomes carry the trace ID of `ctx`.
    #[tracing::instrument(
        skip_all,
        fields(trace_id = %ctx.trace_id(), user_id = %request.user_id)
    )]
    pub async fn place_order(
        &self,
        ctx: &TraceContext,
        request: &PlaceOrder,
    ) -> Result<PlacedOrder, OrchestrationError> {
        metrics::counter!("orchestrations_total").increment(1);
        let started = std::time::Instant::now();

        let result = self.run_steps(ctx, request).await;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("orchestration_duration_seconds").record(duration);

        match &result {
            Ok(placed) => {
                metrics::counter!("orchestrations_succeeded_total").increment(1);
                tracing::info!(order_id = %placed.order_id, duration, "order placed");
            }
            Err(e) => {
                metrics::counter!("orchestrations_failed_total", "step" => e.step.as_str())
                    .increment(1);
                tracing::warn!(
                    step = %e.step,
                    status = e.status(),
                    error = %e.source,
                    duration,
                    "order processing failed"
                );
            }
        }

        result
    }

    async fn run_steps(
        &self,
        ctx: &TraceContext,
        request: &PlaceOrder,
    ) -> Result<PlacedOrder, OrchestrationError> {
        // 1. Reserve inventory
        tracing::info!(step = %Step::ReserveInventory, items = request.items.len(), "checking inventory");
        self.inventory
            .reserve(ctx, &request.items)
            .await
            .map_err(|e| OrchestrationError::new(Step::ReserveInventory, ctx, e))?;

        // 2. Create the order
        tracing::info!(step = %Step::CreateOrder, "creating order");
        let order_id = self
            .orders
            .create_order(ctx, &request.user_id, &request.items)
            .await
            .map_err(|e| OrchestrationError::new(Step::CreateOrder, ctx, e))?;

        // 3. Notify the customer
        tracing::info!(step = %Step::SendNotification, %order_id, "sending notification");
        self.notifications
            .notify(ctx, &request.email, &order_id)
            .await
            .map_err(|e| OrchestrationError::new(Step::SendNotification, ctx, e))?;

        Ok(PlacedOrder {
            order_id,
            trace_id: ctx.trace_id().to_string(),
        })
    }
}
