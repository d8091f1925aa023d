pub mod country_picker;
pub mod tooltip;
pub mod view_controls;
pub mod world_map;
