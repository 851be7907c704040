pub mod batch;
pub mod grid;
pub mod pipeline;
pub mod temporal;

pub use batch::BatchConverter;
pub use grid::GridAssembler;
pub use pipeline::FileConverter;
pub use temporal::{IndexedRow, TemporalIndex, TemporalIndexBuilder};
