pub const DEFAULT_INSTRUCTION: &str = "Use the specified data tool. Do not fabricate data; answer strictly according to the tool output.";

/// Fixed instruction placed in front of every user question.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    instruction: String,
}

impl PromptTemplate {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    pub fn build(&self, question: &str) -> String {
        format!("{}\n\nUser question: {}", self.instruction, question)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUCTION)
    }
}
