//! Reusable payload validators
//!
//! These are composed into per-operation pipelines by the entity modules.

use crate::core::error::{BistroResult, EntityError, QuantityProblem, ValidationError};
use crate::core::payload::{as_integer, display_value, is_present, non_empty_text};
use crate::core::pipeline::{RequestContext, Step};
use crate::core::store::Record;
use serde_json::Value;

/// Payload field holding an order's dish lines
const DISHES_FIELD: &str = "dishes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// Must be a non-empty string
    Text,
    /// Any non-null value; shape is checked by a later step
    Any,
}

/// Validator: field must be present in the payload
pub struct RequireField {
    field: &'static str,
    kind: FieldKind,
}

impl RequireField {
    /// Field must be a non-empty string
    pub fn text(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldKind::Text,
        }
    }

    /// Field must exist and not be null
    pub fn present(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldKind::Any,
        }
    }
}

impl<T: Record> Step<T> for RequireField {
    fn name(&self) -> &'static str {
        "require_field"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        let ok = match self.kind {
            FieldKind::Text => non_empty_text(ctx.data(), self.field).is_some(),
            FieldKind::Any => is_present(ctx.field(self.field)),
        };

        if ok {
            Ok(())
        } else {
            Err(ValidationError::MissingField {
                entity_type: T::entity_type(),
                field: self.field.to_string(),
            }
            .into())
        }
    }
}

/// Validator: `price` must be an integer greater than 0
pub struct PriceIsValid;

impl<T: Record> Step<T> for PriceIsValid {
    fn name(&self) -> &'static str {
        "price_is_valid"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        match ctx.field("price").and_then(as_integer) {
            Some(price) if price > 0 => Ok(()),
            _ => Err(ValidationError::InvalidPrice.into()),
        }
    }
}

/// Validator: a body `id`, when given, must equal the route id
///
/// `null` and `""` count as no id.
pub struct IdMatchesRoute;

impl IdMatchesRoute {
    fn same_id(body_id: &Value, route_id: &str) -> bool {
        let route_number = route_id.parse::<i64>().ok();
        match body_id {
            Value::String(s) => {
                s == route_id
                    || matches!((s.parse::<i64>(), route_number), (Ok(a), Some(b)) if a == b)
            }
            Value::Number(_) => {
                matches!((as_integer(body_id), route_number), (Some(a), Some(b)) if a == b)
            }
            _ => false,
        }
    }
}

impl<T: Record> Step<T> for IdMatchesRoute {
    fn name(&self) -> &'static str {
        "id_matches_route"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        let route_id = ctx.route_id().unwrap_or_default();
        let body_id = match ctx.field("id") {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::String(s)) if s.is_empty() => return Ok(()),
            Some(id) => id,
        };

        if Self::same_id(body_id, route_id) {
            Ok(())
        } else {
            Err(EntityError::IdMismatch {
                entity_type: T::entity_type(),
                body_id: display_value(body_id),
                route_id: route_id.to_string(),
            }
            .into())
        }
    }
}

/// Validator: `dishes` must be a non-empty array
pub struct HasDishes;

impl<T: Record> Step<T> for HasDishes {
    fn name(&self) -> &'static str {
        "has_dishes"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        match ctx.field(DISHES_FIELD) {
            None | Some(Value::Null) => Err(ValidationError::MissingDishes.into()),
            Some(Value::Array(lines)) if !lines.is_empty() => Ok(()),
            Some(_) => Err(ValidationError::EmptyDishes.into()),
        }
    }
}

/// Dish lines of the payload; empty when `dishes` is not an array
fn dish_lines<'a, T: Record>(ctx: &RequestContext<'a, T>) -> &'a [Value] {
    ctx.field(DISHES_FIELD)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Halt at the first line whose quantity matches `bad`
fn first_bad_quantity<T: Record>(
    ctx: &RequestContext<'_, T>,
    problem: QuantityProblem,
    bad: impl Fn(Option<&Value>) -> bool,
) -> BistroResult<()> {
    match dish_lines(ctx)
        .iter()
        .position(|line| bad(line.get("quantity")))
    {
        Some(index) => Err(ValidationError::InvalidQuantity { index, problem }.into()),
        None => Ok(()),
    }
}

/// Validator: every dish line has a quantity
pub struct QuantityPresent;

impl<T: Record> Step<T> for QuantityPresent {
    fn name(&self) -> &'static str {
        "quantity_present"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        first_bad_quantity(ctx, QuantityProblem::Missing, |q| !is_present(q))
    }
}

/// Validator: no dish line has a numeric quantity <= 0
pub struct QuantityPositive;

impl<T: Record> Step<T> for QuantityPositive {
    fn name(&self) -> &'static str {
        "quantity_positive"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        first_bad_quantity(ctx, QuantityProblem::NotPositive, |q| {
            q.and_then(Value::as_f64).is_some_and(|n| n <= 0.0)
        })
    }
}

/// Validator: every dish line's quantity is an integer
pub struct QuantityIsInteger;

impl<T: Record> Step<T> for QuantityIsInteger {
    fn name(&self) -> &'static str {
        "quantity_is_integer"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        first_bad_quantity(ctx, QuantityProblem::NotInteger, |q| {
            q.and_then(as_integer).is_none()
        })
    }
}

/// Validator: `status` must be one of an allowed set
pub struct StatusIsValid {
    allowed: &'static [&'static str],
    optional: bool,
}

impl StatusIsValid {
    pub fn required(allowed: &'static [&'static str]) -> Self {
        Self {
            allowed,
            optional: false,
        }
    }

    /// Passes when `status` is absent; checks it otherwise
    pub fn optional(allowed: &'static [&'static str]) -> Self {
        Self {
            allowed,
            optional: true,
        }
    }
}

impl<T: Record> Step<T> for StatusIsValid {
    fn name(&self) -> &'static str {
        "status_is_valid"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        let status = ctx.field("status");
        if self.optional && !is_present(status) {
            return Ok(());
        }

        match status.and_then(Value::as_str) {
            Some(s) if self.allowed.contains(&s) => Ok(()),
            _ => Err(ValidationError::InvalidStatus {
                entity_type: T::entity_type(),
                allowed: self.allowed,
            }
            .into()),
        }
    }
}

/// Records that may only be removed in some states
pub trait Deletable {
    fn is_deletable(&self) -> bool;
}

/// Guard: the located record must currently be deletable
pub struct CanDelete;

impl<T: Record + Deletable> Step<T> for CanDelete {
    fn name(&self) -> &'static str {
        "can_delete"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        if ctx.located()?.is_deletable() {
            Ok(())
        } else {
            Err(ValidationError::NotPending.into())
        }
    }
}
