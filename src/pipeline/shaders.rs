pub mod blinn_phong;
pub mod gouraud;
pub mod lighting;
pub mod phong;
