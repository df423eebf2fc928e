// Screen chrome shared by every view

pub mod footer;
pub mod header;

pub use footer::Footer;
pub use header::Header;
