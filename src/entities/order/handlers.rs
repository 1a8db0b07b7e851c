//! Order HTTP handlers

use super::OrderStore;
use super::model::{Order, OrderDraft, OrderStatus};
use crate::core::error::BistroResult;
use crate::core::payload::{Envelope, Payload};
use crate::core::pipeline::{Pipeline, RequestContext};
use crate::core::store::ResourceExists;
use crate::core::validation::{
    CanDelete, HasDishes, IdMatchesRoute, QuantityIsInteger, QuantityPositive, QuantityPresent,
    RequireField, StatusIsValid,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Map;
use std::sync::Arc;

/// Step pipelines for every order operation
pub struct OrderPipelines {
    pub create: Pipeline<Order>,
    pub read: Pipeline<Order>,
    pub update: Pipeline<Order>,
    pub delete: Pipeline<Order>,
}

impl OrderPipelines {
    pub fn new() -> Self {
        Self {
            create: Pipeline::new("order.create")
                .step(RequireField::text("deliverTo"))
                .step(RequireField::text("mobileNumber"))
                .step(RequireField::present("dishes"))
                .step(HasDishes)
                .step(QuantityPresent)
                .step(QuantityPositive)
                .step(QuantityIsInteger)
                .step(StatusIsValid::optional(OrderStatus::NAMES)),
            read: Pipeline::new("order.read").step(ResourceExists),
            update: Pipeline::new("order.update")
                .step(ResourceExists)
                .step(IdMatchesRoute)
                .step(RequireField::text("deliverTo"))
                .step(RequireField::text("mobileNumber"))
                .step(RequireField::present("status"))
                .step(RequireField::present("dishes"))
                .step(HasDishes)
                .step(QuantityPresent)
                .step(QuantityPositive)
                .step(QuantityIsInteger)
                .step(StatusIsValid::required(OrderStatus::NAMES)),
            delete: Pipeline::new("order.delete")
                .step(ResourceExists)
                .step(CanDelete),
        }
    }
}

impl Default for OrderPipelines {
    fn default() -> Self {
        Self::new()
    }
}

/// Order-specific AppState
#[derive(Clone)]
pub struct OrderAppState {
    pub store: OrderStore,
    pub pipelines: Arc<OrderPipelines>,
}

impl OrderAppState {
    pub fn new(store: OrderStore) -> Self {
        Self {
            store,
            pipelines: Arc::new(OrderPipelines::new()),
        }
    }
}

pub async fn list_orders(State(state): State<OrderAppState>) -> Json<Envelope<Vec<Order>>> {
    Envelope::json(state.store.list())
}

pub async fn create_order(
    State(state): State<OrderAppState>,
    payload: Payload,
) -> BistroResult<(StatusCode, Json<Envelope<Order>>)> {
    let mut orders = state.store.write();
    let ctx = RequestContext::new(&mut *orders, payload.data());

    let order = state.pipelines.create.run(ctx, |mut ctx| {
        let draft = OrderDraft::from_payload(ctx.data())?;
        Ok(ctx.insert_with(|id| draft.into_order(id)).clone())
    })?;

    tracing::info!(order_id = order.id, lines = order.dishes.len(), "order created");
    Ok((StatusCode::CREATED, Envelope::json(order)))
}

pub async fn read_order(
    State(state): State<OrderAppState>,
    Path(order_id): Path<String>,
) -> BistroResult<Json<Envelope<Order>>> {
    let mut orders = state.store.write();
    let data = Map::new();
    let ctx = RequestContext::new(&mut *orders, &data).with_route_id(&order_id);

    let order = state
        .pipelines
        .read
        .run(ctx, |ctx| Ok(ctx.located()?.clone()))?;

    Ok(Envelope::json(order))
}

/// Replace the located order with one built from the payload
///
/// The new record keeps the original id and is written back to the store.
pub async fn update_order(
    State(state): State<OrderAppState>,
    Path(order_id): Path<String>,
    payload: Payload,
) -> BistroResult<Json<Envelope<Order>>> {
    let mut orders = state.store.write();
    let ctx = RequestContext::new(&mut *orders, payload.data()).with_route_id(&order_id);

    let order = state.pipelines.update.run(ctx, |mut ctx| {
        let draft = OrderDraft::from_payload(ctx.data())?;
        let stored = ctx.located_mut()?;
        *stored = draft.into_order(stored.id);
        Ok(stored.clone())
    })?;

    tracing::info!(
        order_id = order.id,
        status = ?order.status,
        "order updated"
    );
    Ok(Envelope::json(order))
}

pub async fn delete_order(
    State(state): State<OrderAppState>,
    Path(order_id): Path<String>,
) -> BistroResult<StatusCode> {
    let mut orders = state.store.write();
    let data = Map::new();
    let ctx = RequestContext::new(&mut *orders, &data).with_route_id(&order_id);

    let removed = state
        .pipelines
        .delete
        .run(ctx, |mut ctx| ctx.remove_located())?;

    tracing::info!(order_id = removed.id, "order deleted");
    Ok(StatusCode::NO_CONTENT)
}
