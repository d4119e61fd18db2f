pub mod loader;

pub use loader::{DecodedTexture, load_faces};
