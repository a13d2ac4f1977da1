// constants file
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Header of the column the NLD stage reads its terms from.
pub const TERM_COLUMN: &str = "Readable_Term";

pub const DEFINITION_SYSTEM_PROMPT: &str = "You are a senior geoscientist and ontology engineer. Your expertise is in oil and gas exploration geology, with a specific focus on the carbonate reservoirs of the Brazilian Pre-Salt.";

pub const DEFINITION_PROMPT_TEMPLATE: &str = r#"Generate a concise and precise Natural Language Definition (NLD) in Portuguese for the provided geological term.

Mandatory Instructions:
1. The definition must strictly follow the Aristotelian structure "X is a Y that Z". For example, "An amount of rock is a solid consolidated earth material that is constituted by an aggregate of particles made of mineral matter or material of biological origin".
2. Base the definition on your knowledge of Brazilian Pre-Salt geology and petroleum systems.
3. The definition should be technical yet clear, and a maximum of three sentences.
4. Your response must contain only the generated NLD, without any extra text.

Term to be defined: "{term}"
"#;

pub const TERM_EXTRACTION_SYSTEM_PROMPT: &str = "You are a senior geoscientist and ontology engineer building a glossary of oil and gas exploration geology, with a specific focus on the carbonate reservoirs of the Brazilian Pre-Salt.";

pub const TERM_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the candidate domain terms from the source text below.

Mandatory Instructions:
1. Return one term per line, written as a human-readable phrase (e.g. "amount of rock", not "amount_of_rock").
2. Include only terms that name a geological concept, process, material or property.
3. Do not number the terms and do not add any text besides the terms themselves.

Source text:
{corpus}
"#;

pub const CATEGORIZATION_SYSTEM_PROMPT: &str = "You are a senior geoscientist and ontology engineer. You classify geological terms from the Brazilian Pre-Salt domain into top-level ontological categories.";

pub const CATEGORIZATION_PROMPT_TEMPLATE: &str = r#"Assign a single top-level category to the geological term below, using its definition as context.

Mandatory Instructions:
1. Answer with exactly one category name and nothing else.
2. Choose the most specific category that still covers the whole meaning of the term.

Term: "{term}"
Definition: "{nld}"
"#;

pub const DEFAULT_CONFIG_CONTENT: &str = r#"# nld-pipeline configuration.
# Every value here can also be set through the environment with the
# NLD_PIPELINE prefix, e.g. NLD_PIPELINE__MODEL_CONFIG__TEMPERATURE=0.2.
# The API key is usually taken from GEMINI_API_KEY instead.

# verbosity = "info"

[model_config]
model_name = "gemini-2.0-flash"
temperature = 0.0
request_delay_ms = 1000

[files]
corpus_file = "input/corpus.txt"
terms_file = "output/candidate_terms.csv"
definitions_file = "output/definitions.csv"
review_file = "output/definitions_review.csv"
categorized_file = "output/categorized_terms.csv"
categorization_review_file = "output/categorization_review.csv"
"#;
