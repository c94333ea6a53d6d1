use question_relay::application::services::{DEFAULT_INSTRUCTION, PromptTemplate};

#[test]
fn given_default_template_when_building_then_instruction_precedes_question() {
    let prompt = PromptTemplate::default().build("When does train G101 depart?");

    assert_eq!(
        prompt,
        format!(
            "{}\n\nUser question: When does train G101 depart?",
            DEFAULT_INSTRUCTION
        )
    );
}

#[test]
fn given_custom_instruction_when_building_then_uses_it() {
    let prompt = PromptTemplate::new("Answer briefly.").build("Why?");
    assert_eq!(prompt, "Answer briefly.\n\nUser question: Why?");
}
