//! Plain-text rendering of contexts and machines
//!
//! The output follows the Rodin "pretty print" layout: keyword sections
//! (`sets`, `axioms`, `events`, ...) at column zero, declared elements one tab
//! in, and predicates continuing under their label. Rendering is a pure
//! function of the record and the [`RenderOptions`].

use crate::error::{Error, Result};
use crate::model::{Context, Event, Identifier, LabeledPredicate, Machine, Variant};

/// Default indentation width in spaces
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Options controlling the text layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    tab_size: usize,
}

impl RenderOptions {
    /// Create options with the given tab width.
    ///
    /// The width must be even and non-zero: event clause keywords are indented
    /// by one and a half tabs.
    pub fn with_tab_size(tab_size: usize) -> Result<Self> {
        if tab_size == 0 || tab_size % 2 != 0 {
            return Err(Error::ConfigParse {
                message: format!("tab size must be a positive even number, got {}", tab_size),
                hint: Some("use 2, 4 or 8".to_string()),
            });
        }
        Ok(Self { tab_size })
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

/// Render a context
pub fn render_context(context: &Context, options: &RenderOptions) -> String {
    let mut p = Printer::new(options);

    p.push("context ");
    p.push(&context.name);
    p.comment(context.comment.as_deref());

    if !context.extends.is_empty() {
        p.out.push_str(&p.tab);
        p.push("extends");
        for extended in &context.extends {
            p.push(" ");
            p.push(extended);
        }
        p.push("\n");
    }
    p.push("\n");

    p.identifiers("sets", &context.sets);
    p.identifiers("constants", &context.constants);
    p.predicates("axioms", &context.axioms);

    p.push("end\n");
    p.finish()
}

/// Render a machine
pub fn render_machine(machine: &Machine, options: &RenderOptions) -> String {
    let mut p = Printer::new(options);

    p.push("machine ");
    p.push(&machine.name);
    if let Some(refines) = &machine.refines {
        p.push(" refines ");
        p.push(refines);
    }
    if !machine.sees.is_empty() {
        p.push(" sees ");
        p.push(&machine.sees.join(" "));
    }
    p.push("\n\n");

    p.identifiers("variables", &machine.variables);
    p.predicates("invariants", &machine.invariants);
    if let Some(variant) = &machine.variant {
        p.variant(variant);
    }

    if !machine.events.is_empty() {
        p.push("events\n");
        for event in &machine.events {
            p.event(event);
        }
    }

    p.push("end\n");
    p.finish()
}

struct Printer {
    out: String,
    tab: String,
    half_tab: String,
}

impl Printer {
    fn new(options: &RenderOptions) -> Self {
        Self {
            out: String::new(),
            tab: " ".repeat(options.tab_size),
            half_tab: " ".repeat(options.tab_size / 2),
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Terminate the current line, appending the comment if there is one.
    ///
    /// A blank comment is written verbatim without the `//` marker.
    fn comment(&mut self, comment: Option<&str>) {
        if let Some(comment) = comment {
            if comment.trim().is_empty() {
                self.out.push_str(comment);
            } else {
                self.out.push_str(" // ");
                self.out.push_str(&comment.replace('\n', " "));
            }
        }
        self.out.push('\n');
    }

    /// Reflow a multi-line text so continuation lines start at `indent`
    fn reflow(&self, text: &str, indent: &str) -> String {
        text.replace('\n', &format!("\n{}", indent))
            .replace('\t', &self.tab)
    }

    fn identifiers(&mut self, section: &str, identifiers: &[Identifier]) {
        if identifiers.is_empty() {
            return;
        }

        self.push(section);
        self.push("\n");
        for identifier in identifiers {
            self.out.push_str(&self.tab);
            self.out.push_str(&identifier.identifier);
            self.comment(identifier.comment.as_deref());
        }
        self.push("\n");
    }

    /// Axioms and invariants: label on its own line, predicate below it
    fn predicates(&mut self, section: &str, predicates: &[LabeledPredicate]) {
        if predicates.is_empty() {
            return;
        }

        self.push(section);
        self.push("\n");
        let double_tab = self.tab.repeat(2);
        for predicate in predicates {
            let text = self.reflow(&predicate.predicate, &double_tab);

            self.out.push_str(&self.tab);
            if predicate.is_theorem() {
                self.push("theorem ");
            }
            self.push("@");
            self.push(&predicate.label);
            self.push("\n");
            self.push(&double_tab);
            self.push(&text);
            self.comment(predicate.comment.as_deref());
        }
        self.push("\n");
    }

    fn variant(&mut self, variant: &Variant) {
        self.push("variant ");
        self.push(&variant.expression);
        self.comment(variant.comment.as_deref());
        self.push("\n");
    }

    fn event(&mut self, event: &Event) {
        self.event_head(event);

        let clause_indent = format!("{}{}", self.tab, self.half_tab);
        let double_tab = self.tab.repeat(2);

        if !event.parameters.is_empty() {
            self.push(&clause_indent);
            self.push("any\n");
            for parameter in &event.parameters {
                self.push(&double_tab);
                self.push(&parameter.identifier);
                self.comment(parameter.comment.as_deref());
            }
        }

        if !event.guards.is_empty() {
            self.push(&clause_indent);
            self.push("where\n");
            for guard in &event.guards {
                let prefix = if guard.is_theorem() { "theorem " } else { "" };
                self.push(&double_tab);
                self.labeled_line(
                    prefix,
                    &guard.label,
                    &guard.predicate,
                    guard.comment.as_deref(),
                );
            }
        }

        if !event.witnesses.is_empty() {
            self.push(&clause_indent);
            self.push("with\n");
            for witness in &event.witnesses {
                self.push(&double_tab);
                self.labeled_line(
                    "",
                    &witness.label,
                    &witness.predicate,
                    witness.comment.as_deref(),
                );
            }
        }

        if !event.actions.is_empty() {
            self.push(&clause_indent);
            self.push("then\n");
            for action in &event.actions {
                self.push(&double_tab);
                self.labeled_line(
                    "",
                    &action.label,
                    &action.assignment,
                    action.comment.as_deref(),
                );
            }
        }

        self.out.push_str(&self.tab);
        self.push("end\n\n");
    }

    fn event_head(&mut self, event: &Event) {
        self.out.push_str(&self.tab);
        if let Some(keyword) = event.convergence.keyword() {
            self.push(keyword);
            self.push(" ");
        }
        self.push("event ");
        self.push(&event.label);

        let relation = if event.extended { "extends" } else { "refines" };
        if !event.refines.is_empty() {
            self.push(" ");
            self.push(relation);
            self.push(" ");
            self.push(&event.refines.join(" "));
        } else if event.extended {
            self.push(" extends ");
            self.push(&event.label);
        }

        self.comment(event.comment.as_deref());
    }

    /// Guards, witnesses and actions: `@label text` with continuation lines
    /// aligned under the text
    fn labeled_line(&mut self, prefix: &str, label: &str, text: &str, comment: Option<&str>) {
        let offset = prefix.chars().count() + label.chars().count() + 2;
        let indent = format!("{}{}", self.tab.repeat(2), " ".repeat(offset));
        let text = self.reflow(text, &indent);

        self.push(prefix);
        self.push("@");
        self.push(label);
        self.push(" ");
        self.push(&text);
        self.comment(comment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, Convergence, Witness};

    fn ident(id: &str, comment: Option<&str>) -> Identifier {
        Identifier {
            identifier: id.to_string(),
            comment: comment.map(str::to_string),
        }
    }

    fn predicate(label: &str, text: &str) -> LabeledPredicate {
        LabeledPredicate {
            label: label.to_string(),
            predicate: text.to_string(),
            theorem: None,
            comment: None,
        }
    }

    #[test]
    fn test_render_empty_context() {
        let context = Context::new("C0", "m/C0.buc");
        let text = render_context(&context, &RenderOptions::default());
        assert_eq!(text, "context C0\n\nend\n");
    }

    #[test]
    fn test_render_context_sections() {
        let mut context = Context::new("C1", "m/C1.buc");
        context.comment = Some("second\ncontext".to_string());
        context.extends = vec!["C0".to_string()];
        context.sets = vec![ident("S", None)];
        context.constants = vec![ident("c", Some("a constant")), ident("d", None)];
        let mut axm2 = predicate("axm2", "c ∈ S");
        axm2.theorem = Some("true".to_string());
        context.axioms = vec![predicate("axm1", "d ∈ S"), axm2];

        let text = render_context(&context, &RenderOptions::default());
        let expected = "\
context C1 // second context
    extends C0

sets
    S

constants
    c // a constant
    d

axioms
    @axm1
        d ∈ S
    theorem @axm2
        c ∈ S

end
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_blank_comment_is_written_verbatim() {
        let mut context = Context::new("C0", "m/C0.buc");
        context.sets = vec![ident("A", Some("  ")), ident("B", Some(""))];

        let text = render_context(&context, &RenderOptions::default());
        assert!(text.contains("    A  \n"));
        assert!(text.contains("    B\n"));
        assert!(!text.contains("//"));
    }

    #[test]
    fn test_multiline_axiom_continues_at_double_tab() {
        let mut context = Context::new("C0", "m/C0.buc");
        context.axioms = vec![predicate("axm1", "a ∧\n\tb")];

        let text = render_context(&context, &RenderOptions::default());
        assert!(text.contains("    @axm1\n        a ∧\n            b\n"));
    }

    #[test]
    fn test_render_machine_header() {
        let mut machine = Machine::new("M1", "m/M1.bum");
        machine.refines = Some("M0".to_string());
        machine.sees = vec!["C0".to_string(), "C1".to_string()];

        let text = render_machine(&machine, &RenderOptions::default());
        assert_eq!(text, "machine M1 refines M0 sees C0 C1\n\nend\n");
    }

    #[test]
    fn test_render_machine_with_events() {
        let mut machine = Machine::new("M0", "m/M0.bum");
        machine.variables = vec![ident("x", None)];
        machine.invariants = vec![predicate("inv1", "x ∈ ℕ")];
        machine.variant = Some(Variant {
            expression: "10 − x".to_string(),
            comment: None,
        });

        let init = Event::new("INITIALISATION");
        let mut inc = Event::new("inc");
        inc.convergence = Convergence::Convergent;
        inc.comment = Some("step".to_string());
        inc.parameters = vec![ident("n", None)];
        inc.guards = vec![predicate("grd1", "x < 10")];
        inc.actions = vec![Action {
            label: "act1".to_string(),
            assignment: "x ≔ x + 1".to_string(),
            comment: None,
        }];
        machine.events = vec![init, inc];

        let text = render_machine(&machine, &RenderOptions::default());
        let expected = "\
machine M0

variables
    x

invariants
    @inv1
        x ∈ ℕ

variant 10 − x

events
    event INITIALISATION
    end

    convergent event inc // step
      any
        n
      where
        @grd1 x < 10
      then
        @act1 x ≔ x + 1
    end

end
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_event_relations() {
        let mut extended = Event::new("evt");
        extended.extended = true;
        let mut refining = Event::new("evt2");
        refining.refines = vec!["a".to_string(), "b".to_string()];
        let mut anticipated = Event::new("evt3");
        anticipated.convergence = Convergence::Anticipated;
        anticipated.extended = true;
        anticipated.refines = vec!["evt".to_string()];

        let mut machine = Machine::new("M1", "m/M1.bum");
        machine.events = vec![extended, refining, anticipated];

        let text = render_machine(&machine, &RenderOptions::default());
        assert!(text.contains("    event evt extends evt\n"));
        assert!(text.contains("    event evt2 refines a b\n"));
        assert!(text.contains("    anticipated event evt3 extends evt\n"));
    }

    #[test]
    fn test_multiline_guard_aligns_under_text() {
        let mut event = Event::new("evt");
        let mut guard = predicate("g1", "a ∧\nb");
        guard.theorem = Some("true".to_string());
        event.guards = vec![guard];
        event.witnesses = vec![Witness {
            label: "x".to_string(),
            predicate: "x = 1\n∧ y = 2".to_string(),
            comment: Some("w".to_string()),
        }];

        let mut machine = Machine::new("M1", "m/M1.bum");
        machine.events = vec![event];

        let text = render_machine(&machine, &RenderOptions::default());
        // 8 spaces of double tab, then "theorem " (8) + "g1" (2) + 2
        assert!(text.contains("        theorem @g1 a ∧\n                    b\n"));
        assert!(text.contains("      with\n        @x x = 1\n           ∧ y = 2 // w\n"));
    }

    #[test]
    fn test_custom_tab_size() {
        let options = RenderOptions::with_tab_size(2).unwrap();
        let mut machine = Machine::new("M0", "m/M0.bum");
        let mut event = Event::new("evt");
        event.parameters = vec![ident("p", None)];
        machine.events = vec![event];

        let text = render_machine(&machine, &options);
        assert!(text.contains("  event evt\n   any\n    p\n  end\n"));
    }

    #[test]
    fn test_tab_size_must_be_even() {
        assert!(RenderOptions::with_tab_size(3).is_err());
        assert!(RenderOptions::with_tab_size(0).is_err());
        assert_eq!(RenderOptions::with_tab_size(8).unwrap().tab_size(), 8);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let mut context = Context::new("C0", "m/C0.buc");
        context.constants = vec![ident("k", Some("note"))];
        let options = RenderOptions::default();
        assert_eq!(
            render_context(&context, &options),
            render_context(&context, &options)
        );
    }
}
