use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use lexiq::dataset::{Category, QuestionBank};
use lexiq::session::pool::QuestionPool;
use lexiq::session::quiz::{QuizSession, SessionPhase};
use lexiq::session::summary::SessionSummary;
use lexiq::store::json_store::JsonStore;
use lexiq::store::schema::RevisionEntry;

fn seeded_pool(bank: &QuestionBank, category: Category, seed: u64) -> QuestionPool {
    QuestionPool::with_rng(category, bank.questions(category), SmallRng::seed_from_u64(seed))
        .expect("embedded bank has questions for every category")
}

/// Answer the open question correctly by reading off the current correct index.
fn answer_correctly(session: &mut QuizSession) {
    let correct = session
        .current_question()
        .expect("a question is open")
        .correct;
    let outcome = session.record_answer(correct).expect("question was open");
    assert!(outcome.correct);
}

#[test]
fn embedded_bank_loads_and_validates() {
    let bank = QuestionBank::load().unwrap();
    for category in [Category::Antonyms, Category::Synonyms] {
        let questions = bank.questions(category);
        assert!(!questions.is_empty());
        for q in questions {
            assert!(q.correct < q.options.len());
        }
    }
}

#[test]
fn full_session_runs_to_the_cap() {
    let bank = QuestionBank::load().unwrap();
    let mut pool = seeded_pool(&bank, Category::Antonyms, 7);
    let mut session = QuizSession::new(Category::Antonyms, 30, 5);

    assert!(session.start(&mut pool).is_some());
    for _ in 0..4 {
        answer_correctly(&mut session);
        assert!(session.load_next(&mut pool).is_some());
    }
    answer_correctly(&mut session);

    // Cap reached: load_next finishes instead of serving a sixth question.
    assert!(session.load_next(&mut pool).is_none());
    assert_eq!(session.phase(), SessionPhase::Finished);
    assert_eq!(session.score(), 5);
    assert_eq!(session.questions_answered(), 5);
    assert_eq!(session.best_streak(), 5);
    assert_eq!(session.percentage(), 100);

    let summary = SessionSummary::from_session(&session);
    assert_eq!(summary.percentage, 100);
    assert_eq!(summary.mistake_count, 0);
}

#[test]
fn pool_exhaustion_ends_a_session_with_a_large_cap() {
    let bank = QuestionBank::load().unwrap();
    let total = bank.questions(Category::Synonyms).len();
    let mut pool = seeded_pool(&bank, Category::Synonyms, 3);
    let mut session = QuizSession::new(Category::Synonyms, 30, total + 10);

    assert!(session.start(&mut pool).is_some());
    let mut served = 1;
    loop {
        answer_correctly(&mut session);
        if session.load_next(&mut pool).is_none() {
            break;
        }
        served += 1;
    }

    // Every question served exactly once, then the pool signalled empty.
    assert_eq!(served, total);
    assert_eq!(session.phase(), SessionPhase::Finished);
}

#[test]
fn mistakes_flow_into_the_revision_store() {
    let bank = QuestionBank::load().unwrap();
    let mut pool = seeded_pool(&bank, Category::Antonyms, 11);
    let mut session = QuizSession::new(Category::Antonyms, 30, 3);

    session.start(&mut pool).unwrap();
    // Wrong answer, then a skip, then a correct one.
    let wrong = (session.current_question().unwrap().correct + 1) % 4;
    assert!(!session.record_answer(wrong).unwrap().correct);
    session.load_next(&mut pool).unwrap();
    session.record_skip().unwrap();
    session.load_next(&mut pool).unwrap();
    answer_correctly(&mut session);
    session.finish();

    assert_eq!(session.mistakes().len(), 2);
    assert_eq!(session.score(), 1);
    assert_eq!(session.percentage(), 33);

    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut list = store.load_revision_list();
    for mistake in session.mistakes() {
        assert!(list.add(RevisionEntry::from_mistake(mistake)));
    }
    store.save_revision_list(&list).unwrap();

    let reloaded = store.load_revision_list();
    assert_eq!(reloaded.entries.len(), 2);
    assert_eq!(reloaded.entries[0].word, session.mistakes()[0].word);
}

#[test]
fn export_import_round_trip_between_stores() {
    let bank = QuestionBank::load().unwrap();
    let questions = bank.questions(Category::Synonyms);

    let src_dir = TempDir::new().unwrap();
    let src = JsonStore::with_base_dir(src_dir.path().to_path_buf()).unwrap();
    let mut list = src.load_revision_list();
    for q in questions.iter().take(3) {
        list.add(RevisionEntry {
            word: q.word.clone(),
            meaning: q.meaning.clone(),
            correct_answer: q.correct_answer().to_string(),
            category: Category::Synonyms,
            added_at: chrono::Utc::now(),
        });
    }
    src.save_revision_list(&list).unwrap();

    let export_path = src_dir.path().join("transfer.json");
    assert_eq!(src.export_revision_list(&export_path).unwrap(), 3);

    let dst_dir = TempDir::new().unwrap();
    let dst = JsonStore::with_base_dir(dst_dir.path().to_path_buf()).unwrap();
    assert_eq!(dst.import_revision_list(&export_path).unwrap(), 3);
    assert_eq!(dst.import_revision_list(&export_path).unwrap(), 0);

    let imported = dst.load_revision_list();
    assert_eq!(imported.entries.len(), 3);
    assert!(imported.contains(&questions[0].word, Category::Synonyms));
}
