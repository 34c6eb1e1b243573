//! Control DSL engine
//!
//! Interprets a declarative control schema without knowing what any control
//! means. The panel reads a [`RenderPlan`] and writes edits back through
//! [`SettingsState::apply_edit`].
//!
//! ## Architecture
//!
//! - `schema.rs` - DSL types (eight control kinds, layout tree) and lenient parsing
//! - `coerce.rs` - Coerce raw inputs to a control's value type
//! - `items.rs` - Resolve the DSL into standalone blocks and accordion segments
//! - `state.rs` - Live settings map and expanded-group state

pub mod coerce;
pub mod items;
pub mod schema;
pub mod state;

pub use coerce::{coerce_value, values_equal, CoerceError};
pub use items::{resolve, RenderBlock, RenderPlan, ResolvedControl, ResolvedGroup};
pub use schema::{ConfigDsl, ControlConfig, ControlKind, LayoutItem, SelectOption};
pub use state::{Settings, SettingsError, SettingsState};
