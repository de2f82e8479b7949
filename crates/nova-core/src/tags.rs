//! Keyword-based topic tagging.
//!
//! A fixed topic → keyword table drives automatic tag inference for notes
//! and uploaded documents. Matching is case-insensitive substring matching;
//! a topic is assigned when its keywords appear at least twice in total
//! (once for topics with three or fewer keywords). Deterministic and
//! side-effect-free.

/// Topic table: (tag name, keyword list). Keywords are stored lowercase.
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "computer science",
        &["algorithm", "programming", "code", "data structure", "software", "database", "web", "network"],
    ),
    (
        "biology",
        &["cell", "organism", "species", "evolution", "dna", "rna", "protein", "gene", "ecology"],
    ),
    (
        "chemistry",
        &["reaction", "molecule", "atom", "compound", "element", "periodic", "acid", "base", "organic"],
    ),
    (
        "physics",
        &["force", "energy", "motion", "quantum", "relativity", "particle", "wave", "mechanics", "thermodynamics"],
    ),
    (
        "mathematics",
        &["equation", "theorem", "proof", "calculus", "algebra", "geometry", "statistics", "probability"],
    ),
    (
        "history",
        &["war", "revolution", "century", "ancient", "medieval", "empire", "civilization", "president", "king"],
    ),
    (
        "literature",
        &["novel", "poem", "author", "character", "theme", "plot", "narrative", "essay", "fiction"],
    ),
    (
        "psychology",
        &["behavior", "cognitive", "therapy", "mental", "emotion", "brain", "consciousness", "development"],
    ),
    (
        "economics",
        &["market", "price", "demand", "supply", "inflation", "gdp", "economy", "trade", "fiscal"],
    ),
    (
        "philosophy",
        &["ethics", "metaphysics", "epistemology", "logic", "existentialism", "knowledge", "reality"],
    ),
    (
        "art",
        &["painting", "sculpture", "artist", "museum", "gallery", "composition", "aesthetic", "visual"],
    ),
    (
        "music",
        &["song", "rhythm", "melody", "harmony", "composer", "instrument", "chord", "scale", "tempo"],
    ),
    (
        "medicine",
        &["disease", "treatment", "symptom", "diagnosis", "patient", "hospital", "drug", "surgery"],
    ),
    (
        "environmental science",
        &["climate", "ecosystem", "pollution", "conservation", "sustainability", "renewable"],
    ),
    (
        "astronomy",
        &["planet", "star", "galaxy", "universe", "cosmic", "solar", "telescope", "orbit", "nebula"],
    ),
    (
        "geology",
        &["rock", "mineral", "earthquake", "volcano", "plate", "tectonic", "sediment", "erosion"],
    ),
    (
        "political science",
        &["government", "policy", "election", "democracy", "constitution", "law", "rights"],
    ),
    (
        "sociology",
        &["society", "culture", "social", "class", "inequality", "gender", "race", "ethnicity"],
    ),
    (
        "anthropology",
        &["culture", "ritual", "tradition", "kinship", "ethnography", "archaeology", "tribe"],
    ),
    (
        "linguistics",
        &["language", "grammar", "syntax", "semantics", "phonetics", "dialect", "morphology"],
    ),
    (
        "education",
        &["learning", "teaching", "student", "school", "curriculum", "assessment", "pedagogy"],
    ),
    (
        "computer network",
        &["tcp", "ip", "protocol", "router", "packet", "ethernet", "wifi", "lan", "wan"],
    ),
    (
        "data science",
        &["machine learning", "ai", "neural network", "data mining", "big data", "analytics"],
    ),
    (
        "cybersecurity",
        &["encryption", "authentication", "firewall", "malware", "virus", "hack", "vulnerability"],
    ),
    (
        "dna",
        &["gene", "allele", "chromosome", "genome", "nucleotide", "mutation", "helix", "replication"],
    ),
    (
        "cell",
        &["membrane", "nucleus", "mitochondria", "organelle", "cytoplasm", "ribosome", "golgi"],
    ),
    (
        "algorithm",
        &["sorting", "search", "complexity", "recursive", "optimization", "graph", "tree", "dynamic"],
    ),
    (
        "database",
        &["sql", "query", "table", "index", "relational", "nosql", "schema", "transaction", "acid"],
    ),
    (
        "acid",
        &["ph", "base", "proton", "hydrogen", "acidity", "hydroxide", "buffer", "neutralization"],
    ),
];

/// Infer topic tags for a piece of text.
///
/// Counts non-overlapping occurrences of each topic's keywords in the
/// lowercased text. A topic with more than three keywords needs at least
/// two occurrences in total; smaller topics need one.
pub fn infer_tags(text: &str) -> Vec<String> {
    let lowercase = text.to_lowercase();
    let mut tags = Vec::new();

    for (tag, keywords) in TOPIC_KEYWORDS {
        let hits: usize = keywords.iter().map(|kw| lowercase.matches(kw).count()).sum();
        let threshold = if keywords.len() <= 3 { 1 } else { 2 };
        if hits >= threshold {
            tags.push((*tag).to_string());
        }
    }

    tags
}
