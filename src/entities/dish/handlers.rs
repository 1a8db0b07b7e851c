//! Dish HTTP handlers
//!
//! Each handler takes the store's write lock, runs the operation's pipeline
//! and lets the terminal closure touch the store only after every step passed.

use super::DishStore;
use super::model::{Dish, DishDraft};
use crate::core::error::BistroResult;
use crate::core::payload::{Envelope, Payload};
use crate::core::pipeline::{Pipeline, RequestContext};
use crate::core::store::ResourceExists;
use crate::core::validation::{IdMatchesRoute, PriceIsValid, RequireField};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Map;
use std::sync::Arc;

/// Step pipelines for every dish operation
pub struct DishPipelines {
    pub create: Pipeline<Dish>,
    pub read: Pipeline<Dish>,
    pub update: Pipeline<Dish>,
}

impl DishPipelines {
    pub fn new() -> Self {
        Self {
            create: Pipeline::new("dish.create")
                .step(RequireField::text("name"))
                .step(RequireField::text("description"))
                .step(RequireField::text("image_url"))
                .step(RequireField::present("price"))
                .step(PriceIsValid),
            read: Pipeline::new("dish.read").step(ResourceExists),
            update: Pipeline::new("dish.update")
                .step(ResourceExists)
                .step(RequireField::text("name"))
                .step(RequireField::text("description"))
                .step(RequireField::text("image_url"))
                .step(RequireField::present("price"))
                .step(PriceIsValid)
                .step(IdMatchesRoute),
        }
    }
}

impl Default for DishPipelines {
    fn default() -> Self {
        Self::new()
    }
}

/// Dish-specific AppState
#[derive(Clone)]
pub struct DishAppState {
    pub store: DishStore,
    pub pipelines: Arc<DishPipelines>,
}

impl DishAppState {
    pub fn new(store: DishStore) -> Self {
        Self {
            store,
            pipelines: Arc::new(DishPipelines::new()),
        }
    }
}

pub async fn list_dishes(State(state): State<DishAppState>) -> Json<Envelope<Vec<Dish>>> {
    Envelope::json(state.store.list())
}

pub async fn create_dish(
    State(state): State<DishAppState>,
    payload: Payload,
) -> BistroResult<(StatusCode, Json<Envelope<Dish>>)> {
    let mut dishes = state.store.write();
    let ctx = RequestContext::new(&mut *dishes, payload.data());

    let dish = state.pipelines.create.run(ctx, |mut ctx| {
        let draft = DishDraft::from_payload(ctx.data())?;
        Ok(ctx.insert_with(|id| draft.into_dish(id)).clone())
    })?;

    tracing::info!(dish_id = dish.id, name = %dish.name, "dish created");
    Ok((StatusCode::CREATED, Envelope::json(dish)))
}

pub async fn read_dish(
    State(state): State<DishAppState>,
    Path(dish_id): Path<String>,
) -> BistroResult<Json<Envelope<Dish>>> {
    let mut dishes = state.store.write();
    let data = Map::new();
    let ctx = RequestContext::new(&mut *dishes, &data).with_route_id(&dish_id);

    let dish = state
        .pipelines
        .read
        .run(ctx, |ctx| Ok(ctx.located()?.clone()))?;

    Ok(Envelope::json(dish))
}

pub async fn update_dish(
    State(state): State<DishAppState>,
    Path(dish_id): Path<String>,
    payload: Payload,
) -> BistroResult<Json<Envelope<Dish>>> {
    let mut dishes = state.store.write();
    let ctx = RequestContext::new(&mut *dishes, payload.data()).with_route_id(&dish_id);

    let dish = state.pipelines.update.run(ctx, |mut ctx| {
        let draft = DishDraft::from_payload(ctx.data())?;
        let dish = ctx.located_mut()?;
        draft.apply_to(dish);
        Ok(dish.clone())
    })?;

    tracing::info!(dish_id = dish.id, "dish updated");
    Ok(Envelope::json(dish))
}
