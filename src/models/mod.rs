pub mod breadth;
pub mod panel;
pub mod report;
pub mod symbol;
