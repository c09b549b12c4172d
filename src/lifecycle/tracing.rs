//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered by
//! `RUST_LOG`. Every request runs inside spans, so a log line shows which
//! product and which content kind it belongs to.
//!
//! ## Usage
//!
//! ```bash
//! # Request outcomes and per-kind failures
//! RUST_LOG=info listing-forge product lamp.json
//!
//! # Also log each provider call and the resolved configuration (secrets redacted)
//! RUST_LOG=debug listing-forge batch --sheet-id ... --input-range ... --output-range ...
//!
//! # Only the orchestration layer
//! RUST_LOG=listing_forge::orchestrator=debug listing-forge product lamp.json
//! ```
//!
//! ## Span Layout
//!
//! ```text
//! INFO process_product_batch{source_id="1AbC"}: Rows read rows=4
//! INFO process_product_batch:process_batch{rows=3}:generate_all_content{product="Lamp"}:generate{kind=adCopy}: ...
//! WARN process_product_batch:process_batch{rows=3}: Row rejected row=2 error=name is required
//! INFO process_product_batch: Batch complete processed=3
//! ```
//!
//! Generation tasks are spawned with `in_current_span`, so the four concurrent
//! calls of one product stay nested under that product's span.

/// Initializes the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
