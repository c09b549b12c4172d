//! # Prompt Templates
//!
//! One deterministic template per [`ContentKind`]. Templates are plain functions
//! over a validated [`Product`], looked up through [`template`]; the orchestrator
//! only ever calls [`build_prompt`], so adding a kind means adding a variant and
//! a template here.
//!
//! Every prompt starts with the kind's [`heading`] line.

use crate::model::{ContentKind, Product};

/// Fixed system role sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are an expert e-commerce copywriter specializing in \
    Amazon product listings. You write accurate, benefit-driven, keyword-rich copy that \
    follows marketplace style guidelines and never invents product specifications.";

const DEFAULT_AUDIENCE: &str = "General audience";
const NOT_SPECIFIED: &str = "Not specified";

/// A prompt template.
pub type Template = fn(&Product) -> String;

/// Looks up the template for `kind`.
pub fn template(kind: ContentKind) -> Template {
    match kind {
        ContentKind::Title => title,
        ContentKind::BulletPoints => bullet_points,
        ContentKind::APlusContent => a_plus_content,
        ContentKind::AdCopy => ad_copy,
    }
}

/// First line of every prompt built for `kind`.
pub fn heading(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Title => "Create an optimized Amazon product title.",
        ContentKind::BulletPoints => "Write five Amazon product bullet points.",
        ContentKind::APlusContent => "Write Amazon A+ (enhanced brand) content.",
        ContentKind::AdCopy => "Write Amazon Sponsored Products ad copy.",
    }
}

/// Renders the prompt for `kind`.
pub fn build_prompt(kind: ContentKind, product: &Product) -> String {
    template(kind)(product)
}

fn product_details(product: &Product) -> String {
    let mut details = format!(
        "Product details:\n- Name: {}\n- Category: {}\n- Key features: {}\n",
        product.name,
        product.category,
        product.features.as_deref().unwrap_or(NOT_SPECIFIED),
    );
    if let Some(price) = product.price {
        details.push_str(&format!("- Price: ${price:.2}\n"));
    }
    details.push_str(&format!(
        "- Target audience: {}\n- Use case: {}\n",
        product.audience.as_deref().unwrap_or(DEFAULT_AUDIENCE),
        product.use_case.as_deref().unwrap_or(NOT_SPECIFIED),
    ));
    details
}

fn title(product: &Product) -> String {
    format!(
        "{heading}\n\n{details}\n\
         Requirements:\n\
         - Maximum 200 characters\n\
         - Lead with the brand or product name, then the most important keywords\n\
         - Mention the key differentiating feature and the {category} category naturally\n\
         - No promotional phrases (\"best\", \"#1\", \"sale\") and no ALL CAPS words\n\n\
         Return only the title text.",
        heading = heading(ContentKind::Title),
        details = product_details(product),
        category = product.category,
    )
}

fn bullet_points(product: &Product) -> String {
    format!(
        "{heading}\n\n{details}\n\
         Requirements:\n\
         - Exactly 5 bullet points, each starting with a short capitalised benefit phrase\n\
         - Each bullet under 250 characters\n\
         - Translate features into concrete benefits for {audience}\n\
         - Include relevant search keywords without stuffing\n\n\
         Return only the five bullet points, one per line, each starting with \"- \".",
        heading = heading(ContentKind::BulletPoints),
        details = product_details(product),
        audience = product.audience.as_deref().unwrap_or(DEFAULT_AUDIENCE),
    )
}

fn a_plus_content(product: &Product) -> String {
    format!(
        "{heading}\n\n{details}\n\
         Requirements:\n\
         - A headline of at most 80 characters\n\
         - A brand story paragraph (60-100 words)\n\
         - Three feature modules, each with a short heading and a 40-60 word description\n\
         - A closing paragraph that addresses the use case: {use_case}\n\
         - Plain text with section headings; no HTML, no pricing or shipping claims\n\n\
         Return only the content.",
        heading = heading(ContentKind::APlusContent),
        details = product_details(product),
        use_case = product.use_case.as_deref().unwrap_or(NOT_SPECIFIED),
    )
}

fn ad_copy(product: &Product) -> String {
    format!(
        "{heading}\n\n{details}\n\
         Requirements:\n\
         - A headline of at most 50 characters\n\
         - Three short ad variations (at most 150 characters each) for {audience}\n\
         - A clear call to action in each variation\n\
         - Five suggested targeting keywords for the {category} category\n\n\
         Return the headline, the variations and the keywords as labelled sections.",
        heading = heading(ContentKind::AdCopy),
        details = product_details(product),
        audience = product.audience.as_deref().unwrap_or(DEFAULT_AUDIENCE),
        category = product.category,
    )
}
