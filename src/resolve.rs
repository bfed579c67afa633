//! Product resolution pipeline — registry, then AI by serial, then AI by
//! serial + image; first success wins.
//!
//! The ordering is a cost ladder: deterministic trusted data first, then the
//! cheap serial-only inference call, and the image payload only once cheaper
//! context has failed and a file is actually available. The steps are
//! inherently serial — each one's necessity depends on the previous miss —
//! and must not be parallelized.
//!
//! Failure policy: a serial-only search error is swallowed (logged) and
//! treated as a negative verdict so the image step still gets its chance.
//! An error on the final image-grounded step is reported as `SearchError`
//! rather than folded into "no information", so an outage does not
//! masquerade as missing data.

use std::sync::Arc;

use serde::Serialize;

use crate::config;
use crate::data_uri::EncodedFile;
use crate::inference::search::ProductSearch;
use crate::registry::{ProductLookup, ProductRecord};

/// Which strategy produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Registry,
    AiSerial,
    AiSerialAndImage,
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::AiSerial => write!(f, "ai_serial"),
            Self::AiSerialAndImage => write!(f, "ai_serial_and_image"),
        }
    }
}

/// Why resolution terminated without a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// Every step ran (as far as inputs allowed) and came back empty.
    NoInformation,
    /// The final search attempt failed outright; the data may exist.
    SearchError,
}

/// Terminal outcome of one pipeline run.
///
/// A record is only ever carried by `Found` — the pipeline never returns
/// partial or speculative records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Found {
        record: ProductRecord,
        source: ResolutionSource,
    },
    NotFound {
        reason: NotFoundReason,
    },
}

/// Orchestrates the three resolution strategies.
///
/// Holds no state between runs; re-running with identical inputs and
/// identical backend behavior yields an identical outcome.
pub struct ResolutionPipeline {
    registry: Arc<dyn ProductLookup>,
    search: Arc<dyn ProductSearch>,
}

impl ResolutionPipeline {
    pub fn new(registry: Arc<dyn ProductLookup>, search: Arc<dyn ProductSearch>) -> Self {
        Self { registry, search }
    }

    /// Resolve a serial number, optionally grounded by the uploaded file.
    ///
    /// The serial is not pattern-validated: any non-empty string the user
    /// confirmed is a legitimate query.
    pub fn resolve(&self, serial_number: &str, file: Option<&EncodedFile>) -> ResolutionOutcome {
        let _span = tracing::info_span!(
            "resolve_product",
            serial = %serial_number,
            has_file = file.is_some(),
        )
        .entered();

        // Step 1: registry — trusted, deterministic, short-circuits the AI.
        if let Some(record) = self.registry.find_by_serial(serial_number) {
            tracing::info!(source = %ResolutionSource::Registry, "Product resolved");
            return ResolutionOutcome::Found {
                record,
                source: ResolutionSource::Registry,
            };
        }

        // Step 2: AI search by serial only. Errors are swallowed here —
        // the image-grounded step is still worth attempting.
        match self.search.search(serial_number, None) {
            Ok(verdict) => {
                if let Some(info) = verdict.hit() {
                    tracing::info!(source = %ResolutionSource::AiSerial, "Product resolved");
                    return ResolutionOutcome::Found {
                        record: build_record(serial_number, file, info.clone()),
                        source: ResolutionSource::AiSerial,
                    };
                }
                tracing::debug!(reasoning = %verdict.reasoning, "Serial-only search negative");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Serial-only search failed; continuing to next step");
            }
        }

        // Step 3: AI search with image context — only when a file exists.
        let Some(file) = file else {
            tracing::info!(reason = ?NotFoundReason::NoInformation, "Product not resolved");
            return ResolutionOutcome::NotFound {
                reason: NotFoundReason::NoInformation,
            };
        };

        match self.search.search(serial_number, Some(file)) {
            Ok(verdict) => {
                if let Some(info) = verdict.hit() {
                    tracing::info!(source = %ResolutionSource::AiSerialAndImage, "Product resolved");
                    return ResolutionOutcome::Found {
                        record: build_record(serial_number, Some(file), info.clone()),
                        source: ResolutionSource::AiSerialAndImage,
                    };
                }
                tracing::info!(reasoning = %verdict.reasoning, "Image-grounded search negative");
                ResolutionOutcome::NotFound {
                    reason: NotFoundReason::NoInformation,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Image-grounded search failed");
                ResolutionOutcome::NotFound {
                    reason: NotFoundReason::SearchError,
                }
            }
        }
    }
}

/// Build a record from an AI search hit.
///
/// The identifier is the queried serial (never an id the model made up);
/// the image is the locally held upload when available, else a placeholder.
fn build_record(
    serial_number: &str,
    file: Option<&EncodedFile>,
    info: crate::inference::ProductInfo,
) -> ProductRecord {
    ProductRecord {
        identifier: serial_number.to_string(),
        name: info.name,
        kind: info.kind,
        manufacturer: info.manufacturer,
        description: info.description,
        image_url: file
            .map(EncodedFile::to_data_uri)
            .unwrap_or_else(|| config::PLACEHOLDER_IMAGE_URL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::inference::search::{ProductInfo, SearchVerdict};
    use crate::inference::InferenceError;
    use crate::registry::StaticRegistry;

    /// Scripted search mock that records how it was called.
    struct ScriptedSearch {
        verdicts: Mutex<std::collections::VecDeque<Result<SearchVerdict, InferenceError>>>,
        calls: AtomicUsize,
        image_calls: AtomicUsize,
    }

    impl ScriptedSearch {
        fn new(verdicts: Vec<Result<SearchVerdict, InferenceError>>) -> Self {
            Self {
                verdicts: Mutex::new(verdicts.into_iter().collect()),
                calls: AtomicUsize::new(0),
                image_calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn image_calls(&self) -> usize {
            self.image_calls.load(Ordering::SeqCst)
        }
    }

    impl ProductSearch for ScriptedSearch {
        fn search(
            &self,
            _serial_number: &str,
            file: Option<&EncodedFile>,
        ) -> Result<SearchVerdict, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if file.is_some() {
                self.image_calls.fetch_add(1, Ordering::SeqCst);
            }
            self.verdicts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("search called more times than scripted"))
        }
    }

    fn miss() -> Result<SearchVerdict, InferenceError> {
        Ok(SearchVerdict {
            found: false,
            product: None,
            reasoning: "no credible information".into(),
        })
    }

    fn hit(name: &str) -> Result<SearchVerdict, InferenceError> {
        Ok(SearchVerdict {
            found: true,
            product: Some(ProductInfo {
                name: name.into(),
                kind: "Controller Board".into(),
                manufacturer: "Acme Electronics".into(),
                description: "An industrial controller board.".into(),
            }),
            reasoning: "serial prefix matched".into(),
        })
    }

    fn transport_error() -> Result<SearchVerdict, InferenceError> {
        Err(InferenceError::Connection("http://localhost:11434".into()))
    }

    fn sample_file() -> EncodedFile {
        EncodedFile::new("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
    }

    fn pipeline(
        registry: StaticRegistry,
        search: Vec<Result<SearchVerdict, InferenceError>>,
    ) -> (ResolutionPipeline, Arc<ScriptedSearch>) {
        let search = Arc::new(ScriptedSearch::new(search));
        let pipeline = ResolutionPipeline::new(Arc::new(registry), search.clone());
        (pipeline, search)
    }

    #[test]
    fn registry_hit_never_invokes_search() {
        let (pipeline, search) = pipeline(StaticRegistry::with_demo_products(), vec![]);

        let outcome = pipeline.resolve("SN12345XYZ", Some(&sample_file()));

        match outcome {
            ResolutionOutcome::Found { record, source } => {
                assert_eq!(source, ResolutionSource::Registry);
                assert_eq!(record.identifier, "SN12345XYZ");
                assert_eq!(record.name, "QuantumCore X1 Motherboard");
            }
            other => panic!("expected registry hit, got {other:?}"),
        }
        assert_eq!(search.calls(), 0);
    }

    #[test]
    fn all_registry_serials_short_circuit() {
        for serial in ["SN12345XYZ", "MB67890ABC", "A7B8C9D0E1"] {
            let (pipeline, search) = pipeline(StaticRegistry::with_demo_products(), vec![]);
            let outcome = pipeline.resolve(serial, None);
            assert!(matches!(
                outcome,
                ResolutionOutcome::Found {
                    source: ResolutionSource::Registry,
                    ..
                }
            ));
            assert_eq!(search.calls(), 0);
        }
    }

    #[test]
    fn serial_only_hit_skips_image_search() {
        let (pipeline, search) =
            pipeline(StaticRegistry::empty(), vec![hit("Acme AC-900 Controller")]);

        let outcome = pipeline.resolve("AC900-777", Some(&sample_file()));

        match outcome {
            ResolutionOutcome::Found { record, source } => {
                assert_eq!(source, ResolutionSource::AiSerial);
                assert_eq!(record.name, "Acme AC-900 Controller");
            }
            other => panic!("expected AI hit, got {other:?}"),
        }
        assert_eq!(search.calls(), 1);
        assert_eq!(search.image_calls(), 0);
    }

    #[test]
    fn ai_record_identifier_is_the_queried_serial() {
        let (pipeline, _) = pipeline(StaticRegistry::empty(), vec![hit("Acme AC-900")]);

        let outcome = pipeline.resolve("AC900-777", None);

        match outcome {
            ResolutionOutcome::Found { record, .. } => {
                assert_eq!(record.identifier, "AC900-777");
                assert_eq!(record.image_url, config::PLACEHOLDER_IMAGE_URL);
            }
            other => panic!("expected AI hit, got {other:?}"),
        }
    }

    #[test]
    fn ai_record_uses_local_file_preview_when_available() {
        let file = sample_file();
        let (pipeline, _) = pipeline(StaticRegistry::empty(), vec![hit("Acme AC-900")]);

        let outcome = pipeline.resolve("AC900-777", Some(&file));

        match outcome {
            ResolutionOutcome::Found { record, .. } => {
                assert_eq!(record.image_url, file.to_data_uri());
            }
            other => panic!("expected AI hit, got {other:?}"),
        }
    }

    #[test]
    fn serial_miss_with_file_falls_through_to_image_search() {
        let (pipeline, search) = pipeline(StaticRegistry::empty(), vec![miss(), miss()]);

        let outcome = pipeline.resolve("UNKNOWN000", Some(&sample_file()));

        assert_eq!(
            outcome,
            ResolutionOutcome::NotFound {
                reason: NotFoundReason::NoInformation
            }
        );
        assert_eq!(search.calls(), 2);
        assert_eq!(search.image_calls(), 1);
    }

    #[test]
    fn image_search_hit_reports_its_source() {
        let (pipeline, search) = pipeline(
            StaticRegistry::empty(),
            vec![miss(), hit("Acme AC-900 Controller")],
        );

        let outcome = pipeline.resolve("AC900-777", Some(&sample_file()));

        match outcome {
            ResolutionOutcome::Found { source, .. } => {
                assert_eq!(source, ResolutionSource::AiSerialAndImage);
            }
            other => panic!("expected image-grounded hit, got {other:?}"),
        }
        assert_eq!(search.image_calls(), 1);
    }

    #[test]
    fn no_file_terminates_after_serial_search() {
        let (pipeline, search) = pipeline(StaticRegistry::empty(), vec![miss()]);

        let outcome = pipeline.resolve("UNKNOWN000", None);

        assert_eq!(
            outcome,
            ResolutionOutcome::NotFound {
                reason: NotFoundReason::NoInformation
            }
        );
        assert_eq!(search.calls(), 1);
        assert_eq!(search.image_calls(), 0);
    }

    #[test]
    fn serial_search_error_is_swallowed_like_a_miss() {
        // Error-swallow equivalence: step 2 failing is indistinguishable
        // from step 2 returning found=false.
        let (pipeline, search) = pipeline(
            StaticRegistry::empty(),
            vec![transport_error(), hit("Acme AC-900")],
        );

        let outcome = pipeline.resolve("AC900-777", Some(&sample_file()));

        assert!(matches!(
            outcome,
            ResolutionOutcome::Found {
                source: ResolutionSource::AiSerialAndImage,
                ..
            }
        ));
        assert_eq!(search.calls(), 2);
    }

    #[test]
    fn serial_search_error_without_file_is_no_information() {
        let (pipeline, _) = pipeline(StaticRegistry::empty(), vec![transport_error()]);

        let outcome = pipeline.resolve("UNKNOWN000", None);

        assert_eq!(
            outcome,
            ResolutionOutcome::NotFound {
                reason: NotFoundReason::NoInformation
            }
        );
    }

    #[test]
    fn final_step_error_is_reported_as_search_error() {
        let (pipeline, _) = pipeline(
            StaticRegistry::empty(),
            vec![miss(), transport_error()],
        );

        let outcome = pipeline.resolve("UNKNOWN000", Some(&sample_file()));

        assert_eq!(
            outcome,
            ResolutionOutcome::NotFound {
                reason: NotFoundReason::SearchError
            }
        );
    }

    #[test]
    fn identical_inputs_yield_identical_outcomes() {
        let run = || {
            let (pipeline, _) = pipeline(StaticRegistry::empty(), vec![miss(), miss()]);
            pipeline.resolve("UNKNOWN000", Some(&sample_file()))
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn source_serializes_snake_case() {
        let json = serde_json::to_string(&ResolutionSource::AiSerialAndImage).unwrap();
        assert_eq!(json, "\"ai_serial_and_image\"");
        let json = serde_json::to_string(&NotFoundReason::NoInformation).unwrap();
        assert_eq!(json, "\"no_information\"");
    }
}
