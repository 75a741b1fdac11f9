//! Predicate-argument extraction from constituency trees.

use serde::{Deserialize, Serialize};

use super::{Argument, Predicate, PredicateKind, PredicateTuple, Relation, Token};
use crate::tools::{
    is_adjective_tag, is_adverb_tag, is_be_form, is_get_form, is_nominal_tag, is_verb_tag, Label,
    ParseTree, TaggedToken,
};

/// Which secondary constructions become tuples of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Relative clauses take their antecedent as subject (or object).
    pub resolve_relcl: bool,
    pub resolve_appos: bool,
    pub resolve_amod: bool,
    /// Conjoined predicates and arguments each yield their own tuple.
    pub resolve_conj: bool,
    pub resolve_poss: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            resolve_relcl: true,
            resolve_appos: true,
            resolve_amod: true,
            resolve_conj: true,
            resolve_poss: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PredicateExtractor {
    options: ExtractOptions,
}

fn is_negation(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "not" | "n't" | "never")
}

fn tokens_of(leaves: &[&TaggedToken]) -> Vec<Token> {
    leaves.iter().map(|t| Token::from(*t)).collect()
}

fn direct_leaves(node: &ParseTree) -> Vec<&TaggedToken> {
    node.children().iter().filter_map(ParseTree::as_leaf).collect()
}

fn is_coordinated(node: &ParseTree) -> bool {
    direct_leaves(node).iter().any(|t| t.tag == "CC")
}

/// `NP -> NP PP`, `NP -> NP SBAR`, `NP -> NP , NP ,` and the like: the first
/// child carries the head.
fn is_wrapper(np: &ParseTree) -> bool {
    np.children().first().map_or(false, |c| c.is(Label::Np))
        && direct_leaves(np).iter().all(|t| matches!(t.tag.as_str(), "," | ":"))
}

fn head_index(np: &ParseTree) -> Option<usize> {
    let leaves = direct_leaves(np);
    leaves
        .iter()
        .rposition(|t| is_nominal_tag(&t.tag))
        .or_else(|| leaves.iter().rposition(|t| !matches!(t.tag.as_str(), "," | ":" | "POS")))
}

fn head_token(np: &ParseTree) -> Option<&TaggedToken> {
    head_index(np).map(|i| direct_leaves(np)[i])
}

fn argument(core: &ParseTree, rel: Relation) -> Option<Argument> {
    let head = head_token(core)?;
    Some(Argument {
        root: Token::from(head),
        rel,
        tokens: tokens_of(&core.leaves()),
    })
}

fn single(token: &TaggedToken, rel: Relation) -> Argument {
    Argument {
        root: Token::from(token),
        rel,
        tokens: vec![Token::from(token)],
    }
}

fn with_rel(args: &[Argument], rel: Relation) -> Vec<Argument> {
    args.iter()
        .map(|arg| Argument {
            rel,
            ..arg.clone()
        })
        .collect()
}

/// Every combination taking one argument from each slot, in slot order.
fn combinations(slots: &[Vec<Argument>]) -> Vec<Vec<Argument>> {
    let mut out = vec![Vec::new()];
    for slot in slots {
        let mut next = Vec::with_capacity(out.len() * slot.len());
        for prefix in &out {
            for arg in slot {
                let mut args = prefix.clone();
                args.push(arg.clone());
                next.push(args);
            }
        }
        out = next;
    }
    out
}

struct VerbGroup<'a> {
    tokens: Vec<&'a TaggedToken>,
    main: usize,
    rest: &'a [ParseTree],
}

fn verb_group(vp: &ParseTree) -> Option<VerbGroup<'_>> {
    let children = vp.children();
    let split = children
        .iter()
        .position(|c| {
            c.as_leaf()
                .map_or(true, |t| !is_verb_tag(&t.tag) && !is_adverb_tag(&t.tag))
        })
        .unwrap_or(children.len());
    let tokens: Vec<&TaggedToken> =
        children[..split].iter().filter_map(ParseTree::as_leaf).collect();
    let main = tokens.iter().rposition(|t| is_verb_tag(&t.tag))?;
    Some(VerbGroup {
        tokens,
        main,
        rest: &children[split..],
    })
}

/// The main verb heading a VP, clause or complement clause.
fn main_verb(node: &ParseTree) -> Option<&TaggedToken> {
    match node.label()? {
        Label::Vp => match verb_group(node) {
            Some(group) => Some(group.tokens[group.main]),
            None => node.children().iter().find(|c| c.is(Label::Vp)).and_then(main_verb),
        },
        Label::S | Label::Sbar | Label::Pp => node
            .children()
            .iter()
            .find(|c| c.is(Label::Vp) || c.is(Label::S))
            .and_then(main_verb),
        _ => None,
    }
}

impl PredicateExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        PredicateExtractor { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// All tuples of one sentence tree, each predicate before the tuples
    /// nested inside its arguments.
    pub fn extract(&self, tree: &ParseTree) -> Vec<PredicateTuple> {
        let mut out = Vec::new();
        self.visit(tree, &mut out);
        out
    }

    fn visit(&self, node: &ParseTree, out: &mut Vec<PredicateTuple>) {
        match node.label() {
            None => {}
            Some(Label::S) => self.clause(node, None, out),
            Some(Label::Np) => self.visit_np(node, out),
            Some(Label::Vp) => self.verb_tuples(node, &[], &[], out),
            Some(_) => {
                for child in node.children() {
                    self.visit(child, out);
                }
            }
        }
    }

    /// Conjuncts of a noun phrase, reduced to the phrases carrying a head.
    fn cores<'a>(&self, np: &'a ParseTree) -> Vec<&'a ParseTree> {
        if is_coordinated(np) {
            let conjuncts = np.children().iter().filter(|c| c.is(Label::Np));
            if self.options.resolve_conj {
                conjuncts.flat_map(|c| self.cores(c)).collect()
            } else {
                conjuncts.take(1).flat_map(|c| self.cores(c)).collect()
            }
        } else if is_wrapper(np) {
            self.cores(&np.children()[0])
        } else {
            vec![np]
        }
    }

    fn arguments(&self, np: &ParseTree, rel: Relation) -> Vec<Argument> {
        self.cores(np).into_iter().filter_map(|core| argument(core, rel)).collect()
    }

    fn clause(
        &self,
        s: &ParseTree,
        antecedent: Option<&[Argument]>,
        out: &mut Vec<PredicateTuple>,
    ) {
        let children = s.children();
        let first_vp = children.iter().position(|c| c.is(Label::Vp)).unwrap_or(children.len());
        let own_subjects = children[..first_vp]
            .iter()
            .rev()
            .find(|c| c.is(Label::Np))
            .map(|np| self.arguments(np, Relation::Nsubj))
            .unwrap_or_default();

        let (subjects, object) = match antecedent {
            Some(antecedent) if own_subjects.is_empty() => (antecedent.to_vec(), Vec::new()),
            Some(antecedent) => (own_subjects, antecedent.to_vec()),
            None => (own_subjects, Vec::new()),
        };

        for vp in children.iter().filter(|c| c.is(Label::Vp)) {
            self.verb_tuples(vp, &subjects, &object, out);
        }
        for child in children.iter().filter(|c| !c.is(Label::Vp)) {
            self.visit(child, out);
        }
    }

    fn verb_tuples(
        &self,
        vp: &ParseTree,
        subjects: &[Argument],
        object: &[Argument],
        out: &mut Vec<PredicateTuple>,
    ) {
        let children = vp.children();

        if children.first().map_or(false, |c| c.is(Label::Vp)) {
            let mut conjuncts = children.iter().filter(|c| c.is(Label::Vp));
            if self.options.resolve_conj {
                for conjunct in conjuncts {
                    self.verb_tuples(conjunct, subjects, object, out);
                }
            } else if let Some(first) = conjuncts.next() {
                self.verb_tuples(first, subjects, object, out);
                for conjunct in conjuncts {
                    self.verb_tuples(conjunct, &[], &[], out);
                }
            }
            return;
        }

        // to-infinitive: the inner VP carries the predicate
        if children.first().and_then(ParseTree::as_leaf).map_or(false, |t| t.tag == "TO") {
            if let Some(inner) = children.iter().find(|c| c.is(Label::Vp)) {
                self.verb_tuples(inner, subjects, object, out);
            }
            return;
        }

        let Some(group) = verb_group(vp) else {
            for child in children {
                self.visit(child, out);
            }
            return;
        };
        let main = group.tokens[group.main];
        let passive = main.tag == "VBN"
            && group.tokens[..group.main]
                .iter()
                .any(|t| is_be_form(&t.word) || is_get_form(&t.word));
        let copular = is_be_form(&main.word)
            && group.tokens[group.main + 1..].iter().all(|t| is_adverb_tag(&t.tag));
        let predicate_index = if copular {
            group.rest.iter().position(|c| c.is(Label::Np) || c.is(Label::Adjp))
        } else {
            None
        };

        let mut target_tokens = tokens_of(&group.tokens);
        for advp in group.rest.iter().filter(|c| c.is(Label::Advp)) {
            for leaf in advp.leaves() {
                if is_negation(&leaf.word) || leaf.tag == "RP" {
                    target_tokens.push(Token::from(leaf));
                }
            }
        }

        let mut slots: Vec<Vec<Argument>> = Vec::new();
        if !subjects.is_empty() {
            let rel = if passive { Relation::Nsubjpass } else { Relation::Nsubj };
            slots.push(with_rel(subjects, rel));
        }
        if !object.is_empty() {
            slots.push(with_rel(object, Relation::Dobj));
        }
        for (i, child) in group.rest.iter().enumerate() {
            if Some(i) == predicate_index {
                continue;
            }
            let slot = match child.label() {
                Some(Label::Np) => self.arguments(child, Relation::Dobj),
                Some(Label::Pp) => self.pp_arguments(child),
                Some(Label::Adjp) => {
                    let leaves = child.leaves();
                    leaves
                        .iter()
                        .rev()
                        .find(|t| is_adjective_tag(&t.tag))
                        .map(|head| Argument {
                            root: Token::from(*head),
                            rel: Relation::Xcomp,
                            tokens: tokens_of(&leaves),
                        })
                        .into_iter()
                        .collect()
                }
                Some(Label::Vp) => self.clausal_argument(child, Relation::Xcomp),
                Some(Label::Sbar) => self.clausal_argument(child, Relation::Ccomp),
                _ => Vec::new(),
            };
            if !slot.is_empty() {
                slots.push(slot);
            }
        }

        let targets: Vec<Predicate> = match predicate_index {
            Some(i) => {
                let complement = &group.rest[i];
                let cores = if complement.is(Label::Np) {
                    self.cores(complement)
                } else {
                    vec![complement]
                };
                cores
                    .into_iter()
                    .filter_map(|core| {
                        let leaves = core.leaves();
                        let head = if core.is(Label::Adjp) {
                            leaves.iter().rev().find(|t| is_adjective_tag(&t.tag)).copied()
                        } else {
                            head_token(core)
                        }?;
                        let mut tokens = target_tokens.clone();
                        tokens.extend(tokens_of(&leaves));
                        Some(Predicate {
                            root: Token::from(head),
                            tokens,
                            kind: PredicateKind::Copular,
                        })
                    })
                    .collect()
            }
            None => vec![Predicate {
                root: Token::from(main),
                tokens: target_tokens,
                kind: PredicateKind::Verbal,
            }],
        };

        let combos = combinations(&slots);
        for target in &targets {
            for args in &combos {
                out.push(PredicateTuple {
                    target: target.clone(),
                    args: args.clone(),
                });
            }
        }

        for child in group.rest {
            match child.label() {
                // the infinitive shares the subject of its governor
                Some(Label::Vp) => self.verb_tuples(child, subjects, &[], out),
                Some(_) => self.visit(child, out),
                None => {}
            }
        }
    }

    fn pp_arguments(&self, pp: &ParseTree) -> Vec<Argument> {
        let children = pp.children();
        let preposition = children.first().and_then(ParseTree::as_leaf);
        let Some(object) = children.iter().find(|c| c.label().is_some()) else {
            return Vec::new();
        };
        if object.is(Label::Np) {
            self.cores(object)
                .into_iter()
                .filter_map(|core| {
                    let mut arg = argument(core, Relation::Nmod)?;
                    if let Some(preposition) = preposition {
                        arg.tokens.insert(0, Token::from(preposition));
                    }
                    Some(arg)
                })
                .collect()
        } else {
            self.clausal_argument(pp, Relation::Nmod)
        }
    }

    fn clausal_argument(&self, node: &ParseTree, rel: Relation) -> Vec<Argument> {
        main_verb(node)
            .map(|verb| Argument {
                root: Token::from(verb),
                rel,
                tokens: tokens_of(&node.leaves()),
            })
            .into_iter()
            .collect()
    }

    fn visit_np(&self, np: &ParseTree, out: &mut Vec<PredicateTuple>) {
        let children = np.children();
        if is_coordinated(np) {
            for child in children {
                self.visit(child, out);
            }
            return;
        }

        if is_wrapper(np) {
            let first = &children[0];
            let antecedents = self.arguments(first, Relation::Nsubj);
            for child in &children[1..] {
                match child.label() {
                    Some(Label::Sbar)
                        if child.children().first().map_or(false, |c| c.is(Label::Whnp)) =>
                    {
                        for clause in child.children().iter().filter(|c| c.is(Label::S)) {
                            if self.options.resolve_relcl {
                                self.clause(clause, Some(&antecedents), out);
                            } else {
                                self.clause(clause, None, out);
                            }
                        }
                    }
                    Some(Label::Np) => {
                        if self.options.resolve_appos {
                            self.appositive_tuples(child, &antecedents, out);
                        }
                        self.visit_np(child, out);
                    }
                    _ => self.visit(child, out),
                }
            }
            self.visit_np(first, out);
            return;
        }

        let direct = direct_leaves(np);
        if let Some(head_at) = head_index(np) {
            let head = direct[head_at];
            if self.options.resolve_poss {
                if let Some(possessor) = children.first().filter(|c| c.is(Label::Np)) {
                    if let Some(owner) = head_token(possessor) {
                        let owner_tokens = tokens_of(&possessor.leaves());
                        out.push(PredicateTuple {
                            target: Predicate {
                                root: Token::from(owner),
                                tokens: owner_tokens.clone(),
                                kind: PredicateKind::Possessive,
                            },
                            args: vec![
                                Argument {
                                    root: Token::from(owner),
                                    rel: Relation::Poss,
                                    tokens: owner_tokens,
                                },
                                single(head, Relation::Gov),
                            ],
                        });
                    }
                }
                for owner in direct[..head_at].iter().filter(|t| t.tag == "PRP$") {
                    out.push(PredicateTuple {
                        target: Predicate {
                            root: Token::from(*owner),
                            tokens: vec![Token::from(*owner)],
                            kind: PredicateKind::Possessive,
                        },
                        args: vec![single(owner, Relation::Poss), single(head, Relation::Gov)],
                    });
                }
            }
            if self.options.resolve_amod {
                for (i, modifier) in direct[..head_at].iter().enumerate() {
                    if !is_adjective_tag(&modifier.tag) {
                        continue;
                    }
                    let mut tokens = Vec::new();
                    if i > 0 && is_adverb_tag(&direct[i - 1].tag) {
                        tokens.push(Token::from(direct[i - 1]));
                    }
                    tokens.push(Token::from(*modifier));
                    out.push(PredicateTuple {
                        target: Predicate {
                            root: Token::from(*modifier),
                            tokens,
                            kind: PredicateKind::Adjectival,
                        },
                        args: vec![single(head, Relation::Gov)],
                    });
                }
            }
        }
        for child in children.iter().filter(|c| c.is(Label::Np)) {
            self.visit_np(child, out);
        }
    }

    fn appositive_tuples(
        &self,
        appositive: &ParseTree,
        governors: &[Argument],
        out: &mut Vec<PredicateTuple>,
    ) {
        for core in self.cores(appositive) {
            let Some(head) = head_token(core) else {
                continue;
            };
            for governor in governors {
                out.push(PredicateTuple {
                    target: Predicate {
                        root: Token::from(head),
                        tokens: tokens_of(&core.leaves()),
                        kind: PredicateKind::Appositive,
                    },
                    args: vec![Argument {
                        rel: Relation::Gov,
                        ..governor.clone()
                    }],
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tools;

    fn tuples_with(sentence: &str, options: ExtractOptions) -> String {
        let tools = Tools::global();
        let tokens = tools.words.tokenize(sentence);
        let tagged = tools.tagger.tag(&tokens);
        let tree = tools.parser.parse(&tagged);
        PredicateExtractor::new(options)
            .extract(&tree)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn tuples(sentence: &str) -> String {
        tuples_with(sentence, ExtractOptions::default())
    }

    #[test]
    fn active_and_passive() {
        insta::assert_snapshot!(
            tuples("John kicked the ball."),
            @"kicked(nsubj: John, dobj: ball)"
        );
        insta::assert_snapshot!(
            tuples("The ball was kicked by John."),
            @"was kicked(nsubjpass: ball, nmod: John)"
        );
    }

    #[test]
    fn negation_stays_on_the_predicate() {
        insta::assert_snapshot!(tuples("They didn't kick the red ball."), @r###"
        did n't kick(nsubj: They, dobj: ball)
        red(gov: ball)
        "###);
    }

    #[test]
    fn relative_clause_takes_antecedent() {
        insta::assert_snapshot!(tuples("The man that has taken the prize left."), @r###"
        left(nsubj: man)
        has taken(nsubj: man, dobj: prize)
        "###);
    }

    #[test]
    fn conjoined_arguments_expand() {
        insta::assert_snapshot!(tuples("John and Mary bought apples and pears."), @r###"
        bought(nsubj: John, dobj: apples)
        bought(nsubj: John, dobj: pears)
        bought(nsubj: Mary, dobj: apples)
        bought(nsubj: Mary, dobj: pears)
        "###);

        let options = ExtractOptions {
            resolve_conj: false,
            ..ExtractOptions::default()
        };
        insta::assert_snapshot!(
            tuples_with("John and Mary bought apples and pears.", options),
            @"bought(nsubj: John, dobj: apples)"
        );
    }

    #[test]
    fn copular_complement_is_the_predicate() {
        insta::assert_snapshot!(
            tuples("The results were not conclusive."),
            @"were not conclusive(nsubj: results)"
        );
    }

    #[test]
    fn appositive_and_possessive_determiner() {
        insta::assert_snapshot!(tuples("John, my teacher, kicked the ball."), @r###"
        kicked(nsubj: John, dobj: ball)
        my teacher(gov: John)
        my(poss: my, gov: teacher)
        "###);
    }

    #[test]
    fn possessive_clitic() {
        insta::assert_snapshot!(tuples("Mary's students work hard."), @r###"
        work(nsubj: students, xcomp: hard)
        Mary 's(poss: Mary, gov: students)
        "###);
    }

    #[test]
    fn negated_predicates_are_detected() {
        let tools = Tools::global();
        let tokens = tools.words.tokenize("They didn't kick the ball.");
        let tree = tools.parser.parse(&tools.tagger.tag(&tokens));
        let tuples = PredicateExtractor::default().extract(&tree);
        assert!(tuples[0].target.is_negated());
    }
}
