pub mod spec_loading;

pub use spec_loading::{load_spec, load_specs, LoadFailure, LoadedSpec, SpecCorpus};
