//! Parser resource ceilings.
//!
//! Every recursive rule and every unbounded loop in the parser is capped by one of these values. They are the
//! engine's defence against adversarial input: exceeding any of them yields
//! [`ParseError::LimitExceeded`](crate::diagnostics::ParseError::LimitExceeded) instead of a stack overflow or a hang.

/// Parser resource ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum nesting of guarded rules (expressions, types, nested classes, blocks, annotations)
    pub max_depth: usize,
    /// Binary and `instanceof` nodes stacked on one path of an expression tree
    pub max_operator_chain: usize,
    /// Total statements, members and expression terms a single parse may visit
    pub max_parse_operations: usize,
    /// Tokens a skipped expression may consume
    pub max_swallow_tokens: usize,
    /// Tokens scanned when deciding whether `(` starts a lambda; exhausting it means "not a lambda"
    pub max_lambda_lookahead: usize,
    /// Elements in one array initializer
    pub max_array_literal_elements: usize,
    /// `[]` pairs on one type
    pub max_array_dimensions: usize,
    /// Generic parameters, arguments or bounds in one list
    pub max_generic_params: usize,
    /// Segments in a dotted name
    pub max_qualified_name_parts: usize,
    /// Tokens scanned to classify a class member
    pub max_member_lookahead: usize,
    /// Arguments to one annotation
    pub max_annotation_values: usize,
    /// Elements in one annotation array value
    pub max_annotation_array_elements: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_depth: 100,
            max_operator_chain: 1_000,
            max_parse_operations: 100_000,
            max_swallow_tokens: 10_000,
            max_lambda_lookahead: 1_000,
            max_array_literal_elements: 10_000,
            max_array_dimensions: 255,
            max_generic_params: 100,
            max_qualified_name_parts: 50,
            max_member_lookahead: 10_000,
            max_annotation_values: 100,
            max_annotation_array_elements: 1_000,
        }
    }
}

impl ParseLimits {
    /// Create limits with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the operator chain ceiling
    pub fn with_max_operator_chain(mut self, operators: usize) -> Self {
        self.max_operator_chain = operators;
        self
    }

    /// Set the total operation budget
    pub fn with_max_parse_operations(mut self, ops: usize) -> Self {
        self.max_parse_operations = ops;
        self
    }

    /// Set the skipped-expression token budget
    pub fn with_max_swallow_tokens(mut self, tokens: usize) -> Self {
        self.max_swallow_tokens = tokens;
        self
    }

    pub fn with_max_lambda_lookahead(mut self, tokens: usize) -> Self {
        self.max_lambda_lookahead = tokens;
        self
    }

    pub fn with_max_array_literal_elements(mut self, elements: usize) -> Self {
        self.max_array_literal_elements = elements;
        self
    }

    pub fn with_max_array_dimensions(mut self, dims: usize) -> Self {
        self.max_array_dimensions = dims;
        self
    }

    pub fn with_max_generic_params(mut self, params: usize) -> Self {
        self.max_generic_params = params;
        self
    }

    pub fn with_max_qualified_name_parts(mut self, parts: usize) -> Self {
        self.max_qualified_name_parts = parts;
        self
    }

    pub fn with_max_member_lookahead(mut self, tokens: usize) -> Self {
        self.max_member_lookahead = tokens;
        self
    }

    pub fn with_max_annotation_values(mut self, values: usize) -> Self {
        self.max_annotation_values = values;
        self
    }

    pub fn with_max_annotation_array_elements(mut self, elements: usize) -> Self {
        self.max_annotation_array_elements = elements;
        self
    }
}
