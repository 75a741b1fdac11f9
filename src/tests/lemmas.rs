use crate::{keys, token_graph, RunConfig, StageKind, TextProcessor};

fn lemmas(text: &str) -> String {
    let processor = TextProcessor::new(token_graph().unwrap(), StageKind::TextCleaner);
    let doc = processor.run(text, &RunConfig::default().without_cache()).unwrap();
    doc.lemmas(keys::LEMMAS)
        .unwrap()
        .iter()
        .map(|l| format!("{}/{}", l.word, l.lemma))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn punctuation_never_reaches_the_output() {
    insta::assert_snapshot!(
        lemmas("The children were running quickly."),
        @"The/The children/child were/be running/run quickly/quickly"
    );
}

#[test]
fn only_punctuation() {
    assert_eq!(lemmas("?! ..."), "");
}

#[test]
fn word_classes_follow_tags() {
    insta::assert_snapshot!(
        lemmas("She studies bigger theories."),
        @"She/She studies/study bigger/big theories/theory"
    );
}
