pub struct TemplateVariables<'a> {
    context: &'a str,
}

impl<'a> TemplateVariables<'a> {
    pub fn new(context: &'a str) -> Self {
        Self { context }
    }

    /// Helper to substitute template placeholders in a string.
    pub fn substitute_template(&self, s: &str) -> String {
        s.replace("{context}", self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_placeholder() {
        let variables = TemplateVariables::new("Document 1:\nA");

        assert_eq!(
            variables.substitute_template("{context}\n---\n{context}"),
            "Document 1:\nA\n---\nDocument 1:\nA"
        );
        assert_eq!(variables.substitute_template("no slots"), "no slots");
    }
}
