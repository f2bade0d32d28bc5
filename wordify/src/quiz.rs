use rand::seq::SliceRandom;

use crate::storage::{Storage, StorageError, WordEntry};
use crate::utilities::input;

const ANSWER_COUNT: usize = 4;

#[derive(Debug, Clone)]
pub struct Question {
    pub word_uid: i64,
    pub prompt: String,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone)]
pub struct Answer {
    pub content: String,
    pub correct: bool,
}

/// Builds a "which word matches this definition?" question around `word`,
/// with distractors sampled from the rest of the store. Returns `None` when
/// there are no other words to act as distractors.
pub async fn generate_definition_question(
    storage: &Storage,
    word: &WordEntry,
) -> Result<Option<Question>, StorageError> {
    let mut answers = Vec::with_capacity(ANSWER_COUNT);
    answers.push(Answer {
        content: word.word.clone(),
        correct: true,
    });
    let distractors = storage
        .find_words_excluding(&[&word.word], ANSWER_COUNT - 1)
        .await?;
    if distractors.is_empty() {
        return Ok(None);
    }
    for other in distractors {
        answers.push(Answer {
            content: other.word,
            correct: false,
        });
    }
    Ok(Some(Question {
        word_uid: word.uid,
        prompt: format!(
            "What word matches the following definition? {:?}",
            word.definition
        ),
        answers,
    }))
}

/// Asks a question on the console and reads the answer. Accepts the answer
/// number, a close-enough spelling of the answer itself, or `:skip`.
/// Returns whether the chosen answer was correct, `None` if skipped.
pub fn ask_question(question: &mut Question) -> anyhow::Result<Option<bool>> {
    println!("{}", question.prompt);
    question.answers.shuffle(&mut rand::thread_rng());
    for (index, answer) in question.answers.iter().enumerate() {
        println!("[{}]: {}", index + 1, answer.content);
    }
    let answer = loop {
        let chosen_answer = input("Enter the correct answer: ")?;
        let chosen_answer = chosen_answer.trim();
        match chosen_answer.parse::<usize>() {
            Ok(index) => {
                if let Some(answer) = question.answers.get(index.wrapping_sub(1)) {
                    break Some(answer);
                }
            }
            Err(_) => match &chosen_answer.to_lowercase()[..] {
                ":s" | ":skip" => {
                    break None;
                }
                other => {
                    let mut answers = question
                        .answers
                        .iter()
                        .map(|answer| (answer, strsim::jaro(&answer.content.to_lowercase(), other)))
                        .collect::<Vec<(&Answer, f64)>>();
                    // most similar at the start
                    answers.sort_unstable_by(|(_, a), (_, b)| (-a).partial_cmp(&-b).unwrap());
                    let difference = f64::abs(answers[0].1 - answers[1].1);
                    if (answers[0].1 > 0.9 && difference > 0.25) || answers[0].1 == 1.0 {
                        break Some(answers[0].0);
                    }
                }
            },
        }
        println!("Couldn't understand your answer, please try again.");
    };
    Ok(answer.map(|answer| answer.correct))
}
