/*!
 * # BhashaBridge - English, Bengali and Banglish text assistant
 *
 * A Rust library and HTTP service that takes a snippet of text, works out
 * which language it is written in and runs the matching processing chain.
 *
 * ## Features
 *
 * - Language classification into english, bengali, banglish or unknown
 * - Local transliteration of romanized Bengali (Banglish) into Bengali script
 * - Grammar correction and translation through hosted text-to-text models:
 *   - Hugging Face Inference API
 *   - A disabled backend for offline use
 * - Pass-through fallbacks, so a request never fails because a model is down
 * - JSON or form request bodies, JSON reports
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `detection`: Script and trigram based language detection
 * - `classifier`: Language labels and the Banglish heuristic
 * - `transliteration`: Rule-based Banglish to Bengali conversion
 * - `pipeline`: Request handling:
 *   - `pipeline::selector`: Language label to processing plan
 *   - `pipeline::orchestrator`: Plan execution
 *   - `pipeline::report`: The response report
 * - `gateway`: Uniform access to the four capabilities
 * - `providers`: Client implementations for generation backends:
 *   - `providers::huggingface`: Hugging Face Inference API client
 *   - `providers::mock`: In-process provider for tests
 * - `server`: axum HTTP endpoint
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod classifier;
pub mod detection;
pub mod errors;
pub mod gateway;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod server;
pub mod transliteration;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use classifier::{BanglishHeuristic, LanguageClassifier, LanguageLabel};
pub use detection::{LanguageDetector, ScriptDetector, TrigramDetector};
pub use gateway::{Gateway, ModelGateway, StepOutcome};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use pipeline::{Capability, HandleStatus, Orchestrator, PipelinePlan, ResponseReport};
pub use errors::{AppError, GatewayError, ProviderError};
