//! Library half of the pagecraft CLI: the inspect transforms, shared with the
//! build script's completion generation and the integration tests.

pub mod transforms;
