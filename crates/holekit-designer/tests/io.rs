#[path = "io/dxf_export.rs"]
mod dxf_export;
#[path = "io/dxf_import.rs"]
mod dxf_import;
#[path = "io/preview.rs"]
mod preview;
