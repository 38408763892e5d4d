//! Running feature files from disk.
//!
//! Each `<name>.feature` file is paired with the provider registered under
//! `<name>` in a [`ProviderCatalog`]. Files without a provider still run,
//! against a [`NullExecutor`], so every step shows up as missing and the
//! advice explains how to add one.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use crate::advise::{AdviseLog, Advice};
use crate::reporting::{Reporter, Tally};
use crate::{
    NullExecutor, RegistryError, RunError, ScenarioExecutor, StepDefinitions, StepProvider,
    interpret,
};

/// Extension that marks a feature file.
pub const FEATURE_EXTENSION: &str = "feature";

type ExecutorFactory = Box<dyn Fn() -> Result<Box<dyn ScenarioExecutor>, RegistryError>>;

/// Helper name of a feature file: its stem, for `.feature` files only.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use plainbdd::runner::helper_name;
///
/// assert_eq!(helper_name(Utf8Path::new("features/cart.feature")), Some("cart"));
/// assert_eq!(helper_name(Utf8Path::new("features/cart.txt")), None);
/// ```
#[must_use]
pub fn helper_name(path: &Utf8Path) -> Option<&str> {
    if path.extension() == Some(FEATURE_EXTENSION) {
        path.file_stem().filter(|stem| !stem.is_empty())
    } else {
        None
    }
}

/// Conventional world type name for a helper: each `_`-separated word
/// capitalised, followed by `Helper`.
///
/// # Examples
///
/// ```
/// use plainbdd::runner::helper_type_name;
///
/// assert_eq!(helper_type_name("shopping_cart"), "ShoppingCartHelper");
/// assert_eq!(helper_type_name("LOGIN"), "LoginHelper");
/// ```
#[must_use]
pub fn helper_type_name(helper: &str) -> String {
    let mut name: String = helper
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect();
    name.push_str("Helper");
    name
}

/// Step providers keyed by helper name.
///
/// A fresh executor is built for every feature file, so state never carries
/// over between files.
#[derive(Default)]
pub struct ProviderCatalog {
    factories: BTreeMap<String, ExecutorFactory>,
}

impl ProviderCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `helper`, replacing any earlier one.
    pub fn register<F>(&mut self, helper: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn ScenarioExecutor>, RegistryError> + 'static,
    {
        self.factories.insert(helper.into(), Box::new(factory));
        self
    }

    /// Register world type `W`, built from its `Default` value.
    pub fn register_world<W>(&mut self, helper: impl Into<String>) -> &mut Self
    where
        W: StepDefinitions + Default + 'static,
    {
        self.register(helper, || {
            let provider = StepProvider::build(W::default())?;
            Ok(Box::new(provider) as Box<dyn ScenarioExecutor>)
        })
    }

    /// `true` when a provider is registered under `helper`.
    #[must_use]
    pub fn contains(&self, helper: &str) -> bool {
        self.factories.contains_key(helper)
    }

    /// Registered helper names in sorted order.
    pub fn helpers(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build a fresh executor for `helper`, if one is registered.
    ///
    /// # Errors
    ///
    /// Propagates the provider's registration failure.
    pub fn instantiate(
        &self,
        helper: &str,
    ) -> Option<Result<Box<dyn ScenarioExecutor>, RegistryError>> {
        self.factories.get(helper).map(|factory| factory())
    }
}

impl fmt::Debug for ProviderCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

/// Runs one feature file.
#[derive(Debug, Clone, Copy)]
pub struct FeatureFileRunner<'c> {
    catalog: &'c ProviderCatalog,
}

impl<'c> FeatureFileRunner<'c> {
    /// Select providers from `catalog`.
    #[must_use]
    pub fn new(catalog: &'c ProviderCatalog) -> Self {
        Self { catalog }
    }

    /// Interpret the file at `path`, then report advice for it.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NotAFeature`] for a path without the `.feature`
    /// extension, [`RunError::Io`] when the file cannot be read,
    /// [`RunError::Registry`] when its provider is invalid and
    /// [`RunError::Interpret`] when interpretation aborts.
    pub fn run<R>(&self, path: &Utf8Path, reporter: &mut R) -> Result<Tally, RunError>
    where
        R: Reporter + ?Sized,
    {
        let helper = helper_name(path).ok_or_else(|| RunError::NotAFeature {
            path: path.to_owned(),
        })?;
        let text = fs::read_to_string(path).map_err(|source| RunError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut advice = Vec::new();
        let mut executor: Box<dyn ScenarioExecutor> = match self.catalog.instantiate(helper) {
            Some(Ok(executor)) => executor,
            Some(Err(source)) => {
                return Err(RunError::Registry {
                    helper: helper.to_owned(),
                    source,
                });
            }
            None => {
                log::info!("no provider registered for {path}; every step will be missing");
                advice.push(Advice::NoProvider {
                    helper: helper.to_owned(),
                    type_name: helper_type_name(helper),
                    feature: path.to_owned(),
                });
                Box::new(NullExecutor)
            }
        };

        let mut log = AdviseLog::new(&mut *reporter);
        interpret(&mut *executor, &mut log, &text, path.as_str())?;
        let tally = *log.tally();
        advice.extend(log.advice());

        for item in &advice {
            reporter.on_advise(path.as_str(), &item.to_string());
        }
        Ok(tally)
    }
}

/// Totals for a directory run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Feature files interpreted.
    pub files: usize,
    /// Combined counts over all files.
    pub tally: Tally,
}

impl RunSummary {
    /// `true` when no step failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.tally.has_failures()
    }
}

/// Runs every feature file in a directory.
#[derive(Debug, Clone, Copy)]
pub struct FeatureRunner<'c> {
    files: FeatureFileRunner<'c>,
}

impl<'c> FeatureRunner<'c> {
    /// Select providers from `catalog`.
    #[must_use]
    pub fn new(catalog: &'c ProviderCatalog) -> Self {
        Self {
            files: FeatureFileRunner::new(catalog),
        }
    }

    /// Run the `.feature` files directly inside `dir`, sorted by name.
    ///
    /// A missing directory or one without feature files is reported as
    /// advice rather than an error.
    ///
    /// # Errors
    ///
    /// Returns the first [`RunError`] raised while listing or running files.
    pub fn run<R>(&self, dir: &Utf8Path, reporter: &mut R) -> Result<RunSummary, RunError>
    where
        R: Reporter + ?Sized,
    {
        let mut summary = RunSummary::default();
        if !dir.is_dir() {
            let advice = Advice::MissingFeaturesDir {
                dir: dir.to_owned(),
            };
            reporter.on_advise(dir.as_str(), &advice.to_string());
            return Ok(summary);
        }

        let features = discover_features(dir)?;
        if features.is_empty() {
            let advice = Advice::NoFeatures {
                dir: dir.to_owned(),
            };
            reporter.on_advise(dir.as_str(), &advice.to_string());
            return Ok(summary);
        }

        for path in &features {
            log::debug!("running {path}");
            let tally = self.files.run(path, reporter)?;
            summary.files += 1;
            summary.tally.merge(&tally);
        }
        Ok(summary)
    }
}

/// List the `.feature` files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`RunError::Walk`] when the directory cannot be listed.
pub fn discover_features(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, RunError> {
    let mut features = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) if helper_name(&path).is_some() => features.push(path),
            Ok(_) => {}
            Err(path) => log::warn!("skipping non UTF-8 path {}", path.display()),
        }
    }
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("features/cart.feature", Some("cart"))]
    #[case("cart.feature", Some("cart"))]
    #[case("features/.feature", None)]
    #[case("features/cart.feature.txt", None)]
    #[case("features/cart", None)]
    fn derives_helper_names(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(helper_name(Utf8Path::new(path)), expected);
    }

    #[rstest]
    #[case("shopping_cart", "ShoppingCartHelper")]
    #[case("a__b", "ABHelper")]
    #[case("", "Helper")]
    fn renders_type_names(#[case] helper: &str, #[case] expected: &str) {
        assert_eq!(helper_type_name(helper), expected);
    }

    #[test]
    fn catalog_builds_fresh_executors() {
        let mut catalog = ProviderCatalog::new();
        catalog.register("null", || Ok(Box::new(NullExecutor) as Box<dyn ScenarioExecutor>));
        assert!(catalog.contains("null"));
        assert!(matches!(catalog.instantiate("null"), Some(Ok(_))));
        assert!(catalog.instantiate("other").is_none());
        assert_eq!(catalog.helpers().collect::<Vec<_>>(), ["null"]);
    }
}
