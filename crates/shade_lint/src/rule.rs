//! The no-shadow analysis driver.

use crate::exclusion::is_excluded;
use crate::policy::{Policy, Verdict};
use crate::reporter::{Reporter, ShadowReport};
use crate::resolver::find_enclosing;
use shade_core::collections::FxHashSet;
use shade_core::intern::InternedString;
use shade_options::NoShadowOptions;
use shade_scope::{ScopeId, ScopeKind, ScopeTree};
use tracing::{debug, span, trace, Level};

/// Reports declarations that shadow a same-name declaration in an
/// enclosing scope.
#[derive(Debug, Clone, Default)]
pub struct NoShadow {
    options: NoShadowOptions,
}

impl NoShadow {
    pub fn new(options: NoShadowOptions) -> Self {
        Self { options }
    }

    /// Check every scope of `tree` and hand each shadow to `reporter`.
    ///
    /// Scopes are visited in pre-order with siblings in source order, and
    /// bindings in declaration order. Returns the number of reports.
    pub fn run<R: Reporter + ?Sized>(&self, tree: &ScopeTree, reporter: &mut R) -> usize {
        let _span = span!(Level::DEBUG, "no_shadow", scopes = tree.scopes().len()).entered();

        // Names never interned by the tree cannot match any binding.
        let allow: FxHashSet<InternedString> = self
            .options
            .allow
            .iter()
            .filter_map(|name| tree.interner().get(name))
            .collect();
        let policy = Policy::new(&self.options);

        let mut reported = 0;
        let mut checked = 0;
        let mut worklist: Vec<(ScopeId, bool)> = vec![(tree.root(), false)];
        while let Some((scope_id, in_augmentation)) = worklist.pop() {
            let scope = tree.scope(scope_id);
            let in_augmentation = in_augmentation || scope.kind == ScopeKind::GlobalAugmentation;
            for &child in scope.children.iter().rev() {
                worklist.push((child, in_augmentation));
            }
            if in_augmentation {
                trace!(scope = scope_id.0, "skipping global augmentation");
                continue;
            }

            for &binding_id in scope.bindings() {
                let binding = tree.binding(binding_id);
                if let Some(exclusion) = is_excluded(tree, binding, &allow) {
                    trace!(name = tree.name(binding_id), ?exclusion, "excluded");
                    continue;
                }
                checked += 1;

                let outer = find_enclosing(tree, scope_id, binding.name);
                match policy.evaluate(tree, binding, outer) {
                    Verdict::Suppress(gate) => {
                        trace!(name = tree.name(binding_id), ?gate, "suppressed");
                    }
                    Verdict::Report(outer_id) => {
                        let Some(inner_range) = binding.name_range() else {
                            continue;
                        };
                        reporter.report(ShadowReport {
                            inner: binding_id,
                            outer: outer_id,
                            name: tree.name(binding_id).to_string(),
                            inner_range,
                            outer_range: tree.binding(outer_id).name_range(),
                        });
                        reported += 1;
                    }
                }
            }
        }

        debug!(checked, reported, "no-shadow finished");
        reported
    }
}

/// Run the analysis with `options` and collect the reports in order.
pub fn check_no_shadow(tree: &ScopeTree, options: &NoShadowOptions) -> Vec<ShadowReport> {
    let mut reports = Vec::new();
    NoShadow::new(options.clone()).run(tree, &mut reports);
    reports
}
