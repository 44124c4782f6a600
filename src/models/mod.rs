//! 业务数据模型

pub mod grades;
pub mod groups;
pub mod reports;
pub mod school_index;
pub mod seed;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use school_index::SchoolIndex;
