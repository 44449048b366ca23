//! Instruction templates, keyed by operation and option.

/// Option name for operations with a single template.
pub const DEFAULT_OPTION: &str = "default";

/// One instruction template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Tool name the template belongs to.
    pub operation: &'static str,
    /// Option value that selects it.
    pub option: &'static str,
    /// Instruction lines, joined with `\n`.
    pub lines: &'static [&'static str],
}

impl Template {
    /// The instruction text.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Every known template.
pub const TEMPLATES: &[Template] = &[
    Template {
        operation: "describe_image",
        option: "concise",
        lines: &[
            "Describe the image concisely. Include a short scene summary, key objects, and any visible text.",
        ],
    },
    Template {
        operation: "describe_image",
        option: "detailed",
        lines: &[
            "Describe the image in detail. Include: scene summary, main objects, attributes, and any visible text.",
        ],
    },
    Template {
        operation: "ocr_image",
        option: "text",
        lines: &[
            "Extract ALL visible text from the image. Return plain text only, in reading order.",
        ],
    },
    Template {
        operation: "ocr_image",
        option: "json",
        lines: &[
            "Extract ALL visible text from the image.",
            "Return STRICT JSON only (no markdown) with this shape:",
            r#"{"text":"...","lines":[{"line":"..."}],"notes":"..."}"#,
            "If there is no text, return an empty text string and empty lines array.",
        ],
    },
    Template {
        operation: "extract_receipt",
        option: DEFAULT_OPTION,
        lines: &[
            "You are extracting structured data from a receipt image.",
            "Return STRICT JSON only (no markdown) with this shape:",
            "{",
            r#"  "merchant": string | null,"#,
            r#"  "date": string | null,"#,
            r#"  "total": number | null,"#,
            r#"  "currency": string | null,"#,
            r#"  "tax": number | null,"#,
            r#"  "subtotal": number | null,"#,
            r#"  "items": [{"name": string, "qty": number | null, "price": number | null}]"#,
            "}",
            "Use ISO date if possible (YYYY-MM-DD).",
        ],
    },
];

/// Find the template for `operation` and `option`.
#[must_use]
pub fn lookup(operation: &str, option: &str) -> Option<&'static Template> {
    TEMPLATES
        .iter()
        .find(|template| template.operation == operation && template.option == option)
}

/// Render the template for `operation` and `option`.
#[must_use]
pub fn render(operation: &str, option: &str) -> Option<String> {
    lookup(operation, option).map(Template::render)
}
