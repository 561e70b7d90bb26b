pub mod report;
pub mod result;
pub mod scale;
pub mod session;
