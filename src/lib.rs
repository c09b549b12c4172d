#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Listing Forge
//!
//! > **Marketplace listing copy, generated per product or per spreadsheet.**
//!
//! Given a product record (name, category, features, price, audience, use case),
//! this crate produces four pieces of listing text: a title, bullet points, an
//! A+ content block and an ad copy. Each piece is one call to a text-generation
//! provider. Products can be submitted one at a time or read in bulk from a
//! spreadsheet, with the results written back to another range.
//!
//! ## 🏗️ Design
//!
//! ### Partial results are results
//! The four content kinds are generated concurrently and independently. If the ad
//! copy fails but the title succeeds, the caller still gets the title, plus a
//! failure entry naming the kind that failed. Only an invalid record, a quota
//! refusal or an authentication failure turns a request into an error.
//!
//! ### Collaborators are injected
//! The provider and the spreadsheet store are traits ([`TextProvider`](clients::TextProvider),
//! [`SheetStore`](clients::SheetStore)) handed to [`ContentService`](lifecycle::ContentService)
//! at construction. Production wiring uses HTTP clients; tests use the scripted
//! doubles in [`clients::mock`].
//!
//! ### One error taxonomy
//! Every failure is a [`ContentError`](error::ContentError) with a stable code and
//! an HTTP-style status. [`ErrorResponse`](error::ErrorResponse) is the single wire
//! shape for errors, whether it is returned to a caller or written into a batch row.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Inputs ([`model`], [`validation`])
//! - **Role**: Raw [`ProductRecord`](model::ProductRecord)s are parsed into validated
//!   [`Product`](model::Product)s; batch requests into [`BatchTarget`](validation::BatchTarget)s.
//!
//! ### 2. Generation ([`prompts`], [`generator`])
//! - **Role**: One prompt template per [`ContentKind`](model::ContentKind); one provider
//!   call per kind, with provider failures classified into quota, auth or provider errors.
//!
//! ### 3. Orchestration ([`orchestrator`], [`sheets`])
//! - **Role**: Fans out the four kinds per product and walks batch rows in order.
//! - **Key items**: [`ContentOrchestrator`](orchestrator::ContentOrchestrator),
//!   [`FailurePolicy`](orchestrator::FailurePolicy), [`output_rows`](sheets::output_rows).
//!
//! ### 4. Wiring ([`lifecycle`], [`clients`], [`error`])
//! - **Role**: Configuration, the service facade, HTTP adapters and tracing setup.
//! - **Key items**: [`ServiceConfig`](lifecycle::ServiceConfig),
//!   [`ContentService`](lifecycle::ContentService), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! RUST_LOG=info cargo run -- product lamp.json
//!
//! export GOOGLE_SHEETS_TOKEN=ya29...
//! cargo run -- batch --sheet-id 1AbC --input-range 'Products!A1:G' --output-range 'Content!A1'
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod error;
pub mod generator;
pub mod lifecycle;
pub mod model;
pub mod orchestrator;
pub mod prompts;
pub mod sheets;
pub mod validation;
