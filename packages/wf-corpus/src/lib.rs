pub mod annotate;
pub mod context;
pub mod dedup;
pub mod fact;
pub mod hydrate;
pub mod pipeline;
pub mod propagate;
pub mod qrels;
pub mod units;
pub mod window;

mod error;

use std::{future::Future, pin::Pin};

pub use context::BuildContext;
pub use error::{Error, Result};
pub use fact::{Excerpt, Fact, Source, facts_from_records};
pub use hydrate::{ArticleSource, HydrateReport};
pub use pipeline::{Granularity, Pipeline, QueryIntervals, SentenceBase, StageOutput};
pub use qrels::{Judgment, JudgmentSet};
pub use units::{BuildOptions, CorpusBuild, SourceGranularity, Unit, UnitBuilder};
pub use window::{Window, WindowCorpus};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
