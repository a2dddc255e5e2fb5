pub mod input_bar;
pub mod metadata_view;
pub mod sequence_view;
pub mod version_selector;
pub mod viewport;
