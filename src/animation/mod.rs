pub mod fcurve;
pub mod turntable;
