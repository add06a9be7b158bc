//! Record extraction from Rodin XML files
//!
//! Rodin stores every component as a flat XML document whose element and
//! attribute names are qualified with `org.eventb.core.`. Only the direct
//! children of the root element matter, plus the children of each event.
//! Elements this tool does not render (proof obligations, configuration
//! markers and the like) are skipped.

use std::fs;
use std::path::Path;

use log::trace;
use xot::{NameId, Node, Xot};

use crate::error::{Error, Result};
use crate::model::{
    Action, Artifact, ArtifactKind, Context, Convergence, Event, Identifier, LabeledPredicate,
    Machine, Variant, Witness,
};

/// An interned XML name together with its spelling, for error messages
#[derive(Clone, Copy)]
struct Tag {
    id: NameId,
    name: &'static str,
}

struct Names {
    context_file: Tag,
    machine_file: Tag,
    extends_context: Tag,
    carrier_set: Tag,
    constant: Tag,
    axiom: Tag,
    sees_context: Tag,
    refines_machine: Tag,
    variable: Tag,
    invariant: Tag,
    variant: Tag,
    event: Tag,
    refines_event: Tag,
    parameter: Tag,
    guard: Tag,
    witness: Tag,
    action: Tag,

    comment: Tag,
    identifier: Tag,
    label: Tag,
    predicate: Tag,
    theorem: Tag,
    target: Tag,
    expression: Tag,
    convergence: Tag,
    extended: Tag,
    assignment: Tag,
}

impl Names {
    fn new(xot: &mut Xot) -> Self {
        let mut tag = |name: &'static str| Tag {
            id: xot.add_name(name),
            name,
        };
        Self {
            context_file: tag("org.eventb.core.contextFile"),
            machine_file: tag("org.eventb.core.machineFile"),
            extends_context: tag("org.eventb.core.extendsContext"),
            carrier_set: tag("org.eventb.core.carrierSet"),
            constant: tag("org.eventb.core.constant"),
            axiom: tag("org.eventb.core.axiom"),
            sees_context: tag("org.eventb.core.seesContext"),
            refines_machine: tag("org.eventb.core.refinesMachine"),
            variable: tag("org.eventb.core.variable"),
            invariant: tag("org.eventb.core.invariant"),
            variant: tag("org.eventb.core.variant"),
            event: tag("org.eventb.core.event"),
            refines_event: tag("org.eventb.core.refinesEvent"),
            parameter: tag("org.eventb.core.parameter"),
            guard: tag("org.eventb.core.guard"),
            witness: tag("org.eventb.core.witness"),
            action: tag("org.eventb.core.action"),

            comment: tag("org.eventb.core.comment"),
            identifier: tag("org.eventb.core.identifier"),
            label: tag("org.eventb.core.label"),
            predicate: tag("org.eventb.core.predicate"),
            theorem: tag("org.eventb.core.theorem"),
            target: tag("org.eventb.core.target"),
            expression: tag("org.eventb.core.expression"),
            convergence: tag("org.eventb.core.convergence"),
            extended: tag("org.eventb.core.extended"),
            assignment: tag("org.eventb.core.assignment"),
        }
    }
}

/// Read and extract one `.buc` or `.bum` file.
///
/// The artifact name is the file name without its extension.
pub fn extract_file(path: &Path) -> Result<Artifact> {
    let kind = ArtifactKind::from_path(path).ok_or_else(|| Error::InvalidInput {
        path: path.to_path_buf(),
        message: "not a context (.buc) or machine (.bum) file".to_string(),
    })?;
    let xml = fs::read_to_string(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to read '{}': {}", path.display(), e),
    })?;
    extract_str(&xml, path, kind)
}

/// Extract an artifact from XML text that was read from `path`
pub fn extract_str(xml: &str, path: &Path, kind: ArtifactKind) -> Result<Artifact> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| Error::InvalidInput {
            path: path.to_path_buf(),
            message: "cannot derive a component name from the file name".to_string(),
        })?
        .to_string();

    let mut xot = Xot::new();
    let names = Names::new(&mut xot);
    let document = xot.parse(xml).map_err(|e| Error::XmlParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let root = xot
        .document_element(document)
        .map_err(|e| Error::XmlParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let extractor = Extractor {
        xot: &xot,
        names: &names,
        path,
    };
    match kind {
        ArtifactKind::Context => extractor.context(root, name).map(Artifact::Context),
        ArtifactKind::Machine => extractor.machine(root, name).map(Artifact::Machine),
    }
}

struct Extractor<'a> {
    xot: &'a Xot,
    names: &'a Names,
    path: &'a Path,
}

impl Extractor<'_> {
    fn context(&self, root: Node, name: String) -> Result<Context> {
        let n = self.names;
        self.expect_root(root, n.context_file)?;

        let mut context = Context::new(name, self.path);
        context.comment = self.optional(root, n.comment);

        for child in self.child_elements(root) {
            let tag = self.tag_of(child);
            if tag == Some(n.extends_context.id) {
                context
                    .extends
                    .push(self.required(child, n.extends_context, n.target)?);
            } else if tag == Some(n.carrier_set.id) {
                context.sets.push(self.identifier(child, n.carrier_set)?);
            } else if tag == Some(n.constant.id) {
                context.constants.push(self.identifier(child, n.constant)?);
            } else if tag == Some(n.axiom.id) {
                context.axioms.push(self.labeled_predicate(child, n.axiom)?);
            } else {
                self.skip(child);
            }
        }

        Ok(context)
    }

    fn machine(&self, root: Node, name: String) -> Result<Machine> {
        let n = self.names;
        self.expect_root(root, n.machine_file)?;

        let mut machine = Machine::new(name, self.path);

        for child in self.child_elements(root) {
            let tag = self.tag_of(child);
            if tag == Some(n.refines_machine.id) {
                let target = self.required(child, n.refines_machine, n.target)?;
                if let Some(previous) = &machine.refines {
                    return Err(Error::Extract {
                        path: self.path.to_path_buf(),
                        message: format!(
                            "machine refines both '{}' and '{}', but may refine at most one machine",
                            previous, target
                        ),
                    });
                }
                machine.refines = Some(target);
            } else if tag == Some(n.sees_context.id) {
                machine
                    .sees
                    .push(self.required(child, n.sees_context, n.target)?);
            } else if tag == Some(n.variable.id) {
                machine.variables.push(self.identifier(child, n.variable)?);
            } else if tag == Some(n.invariant.id) {
                machine
                    .invariants
                    .push(self.labeled_predicate(child, n.invariant)?);
            } else if tag == Some(n.variant.id) {
                machine.variant = Some(Variant {
                    expression: self.required(child, n.variant, n.expression)?,
                    comment: self.optional(child, n.comment),
                });
            } else if tag == Some(n.event.id) {
                machine.events.push(self.event(child)?);
            } else {
                self.skip(child);
            }
        }

        Ok(machine)
    }

    fn event(&self, node: Node) -> Result<Event> {
        let n = self.names;

        let mut event = Event::new(self.required(node, n.event, n.label)?);
        let convergence = self.required(node, n.event, n.convergence)?;
        event.convergence =
            Convergence::from_attribute(&convergence).ok_or_else(|| Error::Extract {
                path: self.path.to_path_buf(),
                message: format!(
                    "event '{}' has unknown convergence '{}'",
                    event.label, convergence
                ),
            })?;
        event.extended = self.required(node, n.event, n.extended)? == "true";
        event.comment = self.optional(node, n.comment);

        for child in self.child_elements(node) {
            let tag = self.tag_of(child);
            if tag == Some(n.refines_event.id) {
                event
                    .refines
                    .push(self.required(child, n.refines_event, n.target)?);
            } else if tag == Some(n.parameter.id) {
                event.parameters.push(self.identifier(child, n.parameter)?);
            } else if tag == Some(n.guard.id) {
                event.guards.push(self.labeled_predicate(child, n.guard)?);
            } else if tag == Some(n.witness.id) {
                event.witnesses.push(Witness {
                    label: self.required(child, n.witness, n.label)?,
                    predicate: self.required(child, n.witness, n.predicate)?,
                    comment: self.optional(child, n.comment),
                });
            } else if tag == Some(n.action.id) {
                event.actions.push(Action {
                    label: self.required(child, n.action, n.label)?,
                    assignment: self.required(child, n.action, n.assignment)?,
                    comment: self.optional(child, n.comment),
                });
            } else {
                self.skip(child);
            }
        }

        Ok(event)
    }

    fn identifier(&self, node: Node, element: Tag) -> Result<Identifier> {
        Ok(Identifier {
            identifier: self.required(node, element, self.names.identifier)?,
            comment: self.optional(node, self.names.comment),
        })
    }

    fn labeled_predicate(&self, node: Node, element: Tag) -> Result<LabeledPredicate> {
        let n = self.names;
        Ok(LabeledPredicate {
            label: self.required(node, element, n.label)?,
            predicate: self.required(node, element, n.predicate)?,
            theorem: self.optional(node, n.theorem),
            comment: self.optional(node, n.comment),
        })
    }

    fn expect_root(&self, root: Node, expected: Tag) -> Result<()> {
        if self.tag_of(root) == Some(expected.id) {
            Ok(())
        } else {
            Err(Error::Extract {
                path: self.path.to_path_buf(),
                message: format!("expected a <{}> root element", expected.name),
            })
        }
    }

    fn child_elements(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.xot
            .children(node)
            .filter(move |child| self.xot.element(*child).is_some())
    }

    fn tag_of(&self, node: Node) -> Option<NameId> {
        self.xot.element(node).map(|element| element.name())
    }

    fn skip(&self, node: Node) {
        if let Some(name) = self.tag_of(node) {
            trace!(
                "{}: skipping <{}>",
                self.path.display(),
                self.xot.local_name_str(name)
            );
        }
    }

    fn optional(&self, node: Node, attribute: Tag) -> Option<String> {
        self.xot
            .get_attribute(node, attribute.id)
            .map(str::to_string)
    }

    fn required(&self, node: Node, element: Tag, attribute: Tag) -> Result<String> {
        self.optional(node, attribute)
            .ok_or_else(|| Error::MissingAttribute {
                path: self.path.to_path_buf(),
                element: element.name.to_string(),
                attribute: attribute.name.to_string(),
            })
    }
}
