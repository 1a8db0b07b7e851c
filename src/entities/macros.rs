//! Macros for reducing boilerplate when defining records

/// Implement [`Record`](crate::core::store::Record) for a struct with an `id: RecordId` field
///
/// # Example
/// ```rust,ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Dish {
///     pub id: RecordId,
///     pub name: String,
/// }
///
/// impl_record!(Dish, "Dish", "dishes");
/// ```
#[macro_export]
macro_rules! impl_record {
    ($type:ident, $label:expr, $plural:expr) => {
        impl $crate::core::store::Record for $type {
            fn entity_type() -> &'static str {
                $label
            }

            fn resource_name() -> &'static str {
                $plural
            }

            fn id(&self) -> $crate::core::id::RecordId {
                self.id
            }
        }
    };
}
