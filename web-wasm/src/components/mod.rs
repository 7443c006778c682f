//! UIコンポーネント

pub mod column_list;
pub mod header;
pub mod mask_button;
pub mod masking_spinner;
pub mod upload_area;
