//! Document synthesis from aggregated search results.
//!
//! Produces a [`DocumentationBundle`] by extracting superficial key points
//! and concepts from result text and interpolating them into fixed Markdown
//! templates. Pure except for the concept-description pick, which takes an
//! injected [`Rng`] so callers and tests control the randomness.

use crate::types::{SearchResult, Source};
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::collections::HashSet;

/// Keep at most this many key points.
const MAX_KEY_POINTS: usize = 8;

/// Keep at most this many concepts.
const MAX_CONCEPTS: usize = 12;

/// Trimmed sentence fragments must exceed this many characters to count.
const MIN_FRAGMENT_LEN: usize = 20;

/// Words too common to count as concepts.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "with", "this", "that", "from", "have", "will",
];

/// Signal words that mark a sentence fragment as a key point. The first four
/// match case-insensitively, the last two case-sensitively.
const KEY_SIGNALS_CI: &[&str] = &["important", "key", "essential", "benefits"];
const KEY_SIGNALS_CS: &[&str] = &["use", "how"];

/// Generic descriptions paired with concepts in the detailed document.
/// One is chosen at random per concept.
const CONCEPT_DESCRIPTIONS: &[&str] = &[
    "Core component essential for understanding {topic}",
    "Fundamental aspect that plays a crucial role in {topic}",
    "Key element that supports the implementation of {topic}",
    "Important factor in the successful deployment of {topic}",
    "Essential building block for {topic} systems",
];

lazy_static! {
    /// Alphabetic runs of length >= 3 in lower-cased text.
    static ref WORD_RE: Regex = Regex::new(r"\b[a-z]{3,}\b").expect("valid word pattern");
}

/// Synthesized output: one short and one long Markdown document.
#[derive(Debug, Clone)]
pub struct DocumentationBundle {
    /// "Complete Guide to {query}".
    pub title: String,
    /// Short fixed-skeleton guide.
    pub quick_guide: String,
    /// Long fixed-skeleton document with a per-source resource listing.
    pub detailed_documentation: String,
}

/// Synthesize documentation for `query` from `results`.
///
/// Never fails: absent input degrades to generic boilerplate.
pub fn synthesize(query: &str, results: &[SearchResult]) -> DocumentationBundle {
    synthesize_with(query, results, &mut rand::thread_rng())
}

/// Like [`synthesize`] but with a caller-supplied random source, so the
/// concept-description selection can be made deterministic.
pub fn synthesize_with<R: Rng>(
    query: &str,
    results: &[SearchResult],
    rng: &mut R,
) -> DocumentationBundle {
    let key_points = extract_key_points(results);
    let concepts = extract_concepts(query, results);

    DocumentationBundle {
        title: format!("Complete Guide to {query}"),
        quick_guide: quick_guide(query, &key_points, &concepts),
        detailed_documentation: detailed_documentation(query, &key_points, &concepts, results, rng),
    }
}

/// Extract key-point sentences from result snippets.
///
/// Splits each snippet on `.`, keeps trimmed fragments longer than
/// [`MIN_FRAGMENT_LEN`] that carry a signal word, deduplicates by exact
/// string equality in first-seen order, and caps at [`MAX_KEY_POINTS`].
pub fn extract_key_points(results: &[SearchResult]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut key_points = Vec::new();

    for result in results {
        for fragment in result.snippet.split('.') {
            let fragment = fragment.trim();
            if fragment.chars().count() <= MIN_FRAGMENT_LEN {
                continue;
            }
            let lower = fragment.to_lowercase();
            let signalled = KEY_SIGNALS_CI.iter().any(|s| lower.contains(s))
                || KEY_SIGNALS_CS.iter().any(|s| fragment.contains(s));
            if signalled && seen.insert(fragment.to_string()) {
                key_points.push(fragment.to_string());
            }
        }
    }

    key_points.truncate(MAX_KEY_POINTS);
    key_points
}

/// Extract candidate concept words from result titles and snippets.
///
/// Tokenizes the lower-cased text into alphabetic runs, discards short
/// tokens, the query's own words, and stop words, and returns the unique
/// tokens in encounter order, capped at [`MAX_CONCEPTS`].
pub fn extract_concepts(query: &str, results: &[SearchResult]) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let query_words: HashSet<&str> = query_lower.split(' ').collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut concepts = Vec::new();

    for result in results {
        let text = format!("{} {}", result.title, result.snippet).to_lowercase();
        for token in WORD_RE.find_iter(&text) {
            let word = token.as_str();
            if word.len() <= 3 || query_words.contains(word) || STOP_WORDS.contains(&word) {
                continue;
            }
            if seen.insert(word.to_string()) {
                concepts.push(word.to_string());
            }
        }
    }

    concepts.truncate(MAX_CONCEPTS);
    concepts
}

/// Uppercase the first character of each token and lowercase the remainder.
/// Idempotent.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_boundary = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if at_boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(ch);
            at_boundary = true;
        }
    }
    out
}

/// Group results by source, preserving first-seen source order.
///
/// Flattening the groups yields exactly the input list: no loss, no
/// duplication.
pub fn group_by_source(results: &[SearchResult]) -> Vec<(Source, Vec<&SearchResult>)> {
    let mut groups: Vec<(Source, Vec<&SearchResult>)> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|(source, _)| *source == result.source) {
            Some((_, members)) => members.push(result),
            None => groups.push((result.source, vec![result])),
        }
    }
    groups
}

fn bullet_list<'a, I: Iterator<Item = &'a String>>(items: I) -> String {
    items
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quick_guide(query: &str, key_points: &[String], concepts: &[String]) -> String {
    let topic = title_case(query);

    let benefits = if key_points.is_empty() {
        "• Improved efficiency and productivity\n\
         • Enhanced capabilities and functionality\n\
         • Better integration and compatibility\n\
         • Reduced complexity and learning curve"
            .to_string()
    } else {
        bullet_list(key_points.iter().take(4))
    };

    let essential_concepts = concepts
        .iter()
        .take(6)
        .map(|concept| format!("• **{}**: Core component of {topic}", title_case(concept)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Quick Start Guide for {topic}\n\
         \n\
         ## What is {topic}?\n\
         {topic} is an important topic that encompasses various concepts, technologies, \
         and methodologies. This quick guide provides essential information to get you started.\n\
         \n\
         ## Key Benefits:\n\
         {benefits}\n\
         \n\
         ## Essential Concepts:\n\
         {essential_concepts}\n\
         \n\
         ## Getting Started:\n\
         1. **Understand the Basics**: Learn fundamental concepts and terminology\n\
         2. **Explore Use Cases**: Identify how {topic} applies to your specific needs\n\
         3. **Choose Tools**: Select appropriate tools and technologies\n\
         4. **Start Small**: Begin with simple implementations\n\
         5. **Scale Gradually**: Expand your usage as you gain experience\n\
         \n\
         ## Next Steps:\n\
         - Review the complete documentation below\n\
         - Explore recommended tools and platforms\n\
         - Join relevant communities and forums\n\
         - Stay updated with latest developments\n\
         \n\
         ---\n\
         *Generated from multiple search engines and knowledge sources*"
    )
}

fn concept_description<R: Rng>(topic: &str, rng: &mut R) -> String {
    let template = CONCEPT_DESCRIPTIONS
        .choose(rng)
        .unwrap_or(&CONCEPT_DESCRIPTIONS[0]);
    template.replace("{topic}", topic)
}

fn detailed_documentation<R: Rng>(
    query: &str,
    key_points: &[String],
    concepts: &[String],
    results: &[SearchResult],
    rng: &mut R,
) -> String {
    let topic = title_case(query);
    let current_date = chrono::Local::now().format("%Y-%m-%d");

    let principles = concepts
        .iter()
        .take(8)
        .map(|concept| {
            format!(
                "- **{}**: {}",
                title_case(concept),
                concept_description(&topic, rng)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let components = concepts
        .iter()
        .skip(8)
        .take(4)
        .map(|concept| {
            format!(
                "- **{}**: Supporting infrastructure and functionality",
                title_case(concept)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let important_points = if key_points.is_empty() {
        "- Essential for modern implementations\n\
         - Widely adopted across industries\n\
         - Continuous evolution and improvement\n\
         - Strong community support and resources"
            .to_string()
    } else {
        key_points
            .iter()
            .map(|point| format!("- {point}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let source_sections = group_by_source(results)
        .into_iter()
        .map(|(source, members)| {
            let links = members
                .iter()
                .map(|result| format!("- [{}]({})", result.title, result.url))
                .collect::<Vec<_>>()
                .join("\n");
            format!("\n#### {source}\n{links}\n")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Complete Documentation for {topic}\n\
         \n\
         ## Table of Contents\n\
         1. [Introduction](#introduction)\n\
         2. [Core Concepts](#core-concepts)\n\
         3. [Key Information](#key-information)\n\
         4. [Implementation Guide](#implementation-guide)\n\
         5. [Best Practices](#best-practices)\n\
         6. [Common Use Cases](#common-use-cases)\n\
         7. [Resources and References](#resources-and-references)\n\
         \n\
         ## 1. Introduction\n\
         \n\
         {topic} represents a comprehensive approach to solving complex challenges in modern \
         technology and business environments. This documentation provides detailed insights, \
         practical examples, and step-by-step guidance for implementing {topic} effectively.\n\
         \n\
         ### Why {topic} Matters\n\
         In today's rapidly evolving landscape, {topic} has become increasingly important for \
         organizations seeking to optimize their operations, enhance user experiences, and \
         maintain competitive advantages.\n\
         \n\
         ## 2. Core Concepts\n\
         \n\
         ### Fundamental Principles\n\
         {principles}\n\
         \n\
         ### Key Components\n\
         Understanding the essential components of {topic} is crucial for successful \
         implementation:\n\
         {components}\n\
         \n\
         ## 3. Key Information\n\
         \n\
         ### Important Points\n\
         {important_points}\n\
         \n\
         ## 4. Implementation Guide\n\
         \n\
         ### Prerequisites\n\
         Before implementing {topic}, ensure you have:\n\
         - Technical infrastructure and system requirements\n\
         - Necessary skills and knowledge base\n\
         - Required tools and development environments\n\
         - Proper planning and project management structure\n\
         \n\
         ### Step-by-Step Implementation\n\
         1. **Planning Phase**: Define objectives, scope, and success criteria\n\
         2. **Research Phase**: Gather information and understand requirements\n\
         3. **Setup Phase**: Prepare environment and install dependencies\n\
         4. **Development Phase**: Build core functionality and features\n\
         5. **Testing Phase**: Conduct thorough testing and validation\n\
         6. **Deployment Phase**: Release and monitor system performance\n\
         7. **Maintenance Phase**: Ongoing support and continuous improvement\n\
         \n\
         ## 5. Best Practices\n\
         \n\
         ### Development Best Practices\n\
         - Follow industry standards and established conventions\n\
         - Implement proper documentation and code comments\n\
         - Use version control and collaborative development workflows\n\
         - Conduct regular reviews and quality assessments\n\
         \n\
         ### Performance Optimization\n\
         - Monitor system performance regularly\n\
         - Implement caching strategies where appropriate\n\
         - Optimize for scalability and future growth\n\
         - Regular maintenance and updates\n\
         \n\
         ## 6. Common Use Cases\n\
         \n\
         ### Enterprise Applications\n\
         Large organizations often implement {topic} to streamline operations, improve data \
         management, and enhance decision-making processes.\n\
         \n\
         ### Small Business Solutions\n\
         Small and medium businesses can leverage {topic} to compete more effectively, reduce \
         costs, and improve customer satisfaction.\n\
         \n\
         ### Personal Projects\n\
         Individual developers and enthusiasts use {topic} for learning, experimentation, and \
         building innovative solutions.\n\
         \n\
         ## 7. Resources and References\n\
         \n\
         ### Search Results Summary\n\
         This documentation was compiled from the following sources:\n\
         {source_sections}\n\
         \n\
         ### Additional Resources\n\
         - Official documentation and reference materials\n\
         - Community forums and discussion platforms\n\
         - Training materials and educational content\n\
         - Best practice examples and case studies\n\
         \n\
         ## Conclusion\n\
         \n\
         This comprehensive guide provides the foundation for understanding and implementing \
         {topic} effectively. The information has been compiled from multiple authoritative \
         sources and structured to provide both quick reference and detailed guidance.\n\
         \n\
         Continue exploring the resources provided, engage with the community, and apply these \
         concepts to your specific use cases for optimal results.\n\
         \n\
         ---\n\
         \n\
         *Documentation generated on: {current_date}*\n\
         *Sources: Multiple search engines and knowledge bases*\n\
         *Total sources referenced: {count}*",
        count = results.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn result(title: &str, snippet: &str, source: Source) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: "https://example.org/".to_string(),
            snippet: snippet.to_string(),
            source,
        }
    }

    #[test]
    fn key_points_require_signal_words_and_length() {
        let results = vec![result(
            "Rust",
            "Rust has important memory safety guarantees. Short key. \
             It is how systems programmers build reliable software. \
             Nothing notable in this particular sentence of prose at all.",
            Source::DuckDuckGo,
        )];
        let points = extract_key_points(&results);
        assert_eq!(points.len(), 2);
        assert!(points[0].contains("important"));
        assert!(points[1].contains("how"));
    }

    #[test]
    fn key_points_signal_case_sensitivity() {
        // "Use" capitalized does not match the case-sensitive signal,
        // "IMPORTANT" still matches the case-insensitive one.
        let results = vec![result(
            "t",
            "Use these patterns whenever refactoring old code. \
             This fact is IMPORTANT for all maintainers everywhere.",
            Source::Wikipedia,
        )];
        let points = extract_key_points(&results);
        assert_eq!(points.len(), 1);
        assert!(points[0].contains("IMPORTANT"));
    }

    #[test]
    fn key_points_length_counts_characters_not_bytes() {
        // 20 characters but 22 bytes: still too short to keep.
        let results = vec![result("t", "très important à oui.", Source::Wikipedia)];
        assert!(extract_key_points(&results).is_empty());

        // One character over the threshold is kept.
        let results = vec![result("t", "très important à ouis.", Source::Wikipedia)];
        assert_eq!(extract_key_points(&results).len(), 1);
    }

    #[test]
    fn key_points_dedup_preserves_first_seen_order_and_caps() {
        let sentence = "This is the most important consideration of all";
        let snippet = format!("{sentence}. {sentence}. ");
        let results: Vec<_> = (0..10)
            .map(|_| result("t", &snippet, Source::DuckDuckGo))
            .collect();
        let points = extract_key_points(&results);
        assert_eq!(points, vec![sentence.to_string()]);

        // Extraction is idempotent on its dedup step.
        let again = extract_key_points(&results);
        assert_eq!(points, again);
    }

    #[test]
    fn concepts_skip_query_words_stop_words_and_short_tokens() {
        let results = vec![result(
            "Rust ownership model",
            "The borrow checker and ownership are key ideas for this zoo",
            Source::DuckDuckGo,
        )];
        let concepts = extract_concepts("rust model", &results);
        assert!(concepts.contains(&"ownership".to_string()));
        assert!(concepts.contains(&"borrow".to_string()));
        assert!(concepts.contains(&"checker".to_string()));
        // query word
        assert!(!concepts.contains(&"rust".to_string()));
        assert!(!concepts.contains(&"model".to_string()));
        // stop words
        assert!(!concepts.contains(&"the".to_string()));
        assert!(!concepts.contains(&"and".to_string()));
        // length <= 3
        assert!(!concepts.contains(&"key".to_string()));
        assert!(!concepts.contains(&"zoo".to_string()));
    }

    #[test]
    fn concepts_are_unique_in_encounter_order_and_capped() {
        let snippet = "alpha beta gamma delta epsilon zetas etaeta theta iotas kappa \
                       lambda muons nuons alpha beta gamma xixi omicron pipi rhos";
        let results = vec![result("t", snippet, Source::Wikipedia)];
        let concepts = extract_concepts("query", &results);
        assert_eq!(concepts.len(), MAX_CONCEPTS);
        assert_eq!(concepts[0], "alpha");
        let unique: HashSet<_> = concepts.iter().collect();
        assert_eq!(unique.len(), concepts.len());
    }

    #[test]
    fn title_case_is_idempotent() {
        for input in ["machine learning", "RUST", "don't stop", "a-b c", ""] {
            let once = title_case(input);
            assert_eq!(title_case(&once), once, "input: {input:?}");
        }
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("RUST"), "Rust");
    }

    #[test]
    fn group_by_source_flattens_back_to_input() {
        let results = vec![
            result("a", "s", Source::DuckDuckGo),
            result("b", "s", Source::Wikipedia),
            result("c", "s", Source::DuckDuckGo),
            result("d", "s", Source::Google),
        ];
        let groups = group_by_source(&results);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0, Source::DuckDuckGo);
        assert_eq!(groups[0].1.len(), 2);

        let flattened: Vec<&SearchResult> =
            groups.iter().flat_map(|(_, members)| members.clone()).collect();
        assert_eq!(flattened.len(), results.len());
        for r in &results {
            assert_eq!(
                flattened.iter().filter(|f| **f == r).count(),
                results.iter().filter(|o| *o == r).count()
            );
        }
    }

    #[test]
    fn synthesize_with_seeded_rng_is_deterministic() {
        let results = vec![result(
            "Rust",
            "Rust has important memory safety guarantees for concurrency",
            Source::DuckDuckGo,
        )];
        let a = synthesize_with("rust", &results, &mut StdRng::seed_from_u64(7));
        let b = synthesize_with("rust", &results, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.detailed_documentation, b.detailed_documentation);
        assert_eq!(a.quick_guide, b.quick_guide);
    }

    #[test]
    fn empty_input_degrades_to_generic_boilerplate() {
        let bundle = synthesize_with("rust", &[], &mut StdRng::seed_from_u64(1));
        assert_eq!(bundle.title, "Complete Guide to rust");
        assert!(bundle.quick_guide.contains("Improved efficiency and productivity"));
        assert!(bundle
            .detailed_documentation
            .contains("Essential for modern implementations"));
        assert!(bundle.detailed_documentation.contains("Total sources referenced: 0"));
    }

    #[test]
    fn detailed_documentation_groups_resources_by_source() {
        let results = vec![
            result("DDG hit", "snippet", Source::DuckDuckGo),
            result("Wiki hit", "snippet", Source::Wikipedia),
        ];
        let bundle = synthesize_with("rust", &results, &mut StdRng::seed_from_u64(2));
        assert!(bundle.detailed_documentation.contains("#### DuckDuckGo"));
        assert!(bundle.detailed_documentation.contains("#### Wikipedia"));
        assert!(bundle
            .detailed_documentation
            .contains("- [DDG hit](https://example.org/)"));
    }

    #[test]
    fn quick_guide_title_cases_the_query() {
        let bundle = synthesize_with("machine learning", &[], &mut StdRng::seed_from_u64(3));
        assert!(bundle
            .quick_guide
            .contains("## What is Machine Learning?"));
    }
}
