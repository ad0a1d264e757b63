pub mod asset;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod modifiers;
pub mod rig;
