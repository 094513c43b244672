//! Built-in dialogue content.
//!
//! The start script is the bootstrap graph of every fresh session. Its content
//! is fixed data: ids, names, messages, types and edges are reproduced exactly
//! so persisted sessions stay compatible.

use crate::models::{Script, ScriptId, ScriptState, Step, StepId, StepKind, StepState};

/// Id of the start script.
pub const START_SCRIPT_ID: ScriptId = 1;

/// Name of the start script.
pub const START_SCRIPT_NAME: &str = "Start";

/// Script the start script chains into once finished.
pub const START_NEXT_SCRIPT_ID: ScriptId = 239;

/// Entry step of the start script.
pub const ENTRY_STEP_ID: StepId = 1;

struct SeedStep {
    id: StepId,
    name: &'static str,
    message: &'static str,
    sequence: i64,
    state: StepState,
    kind: StepKind,
    next_step_ids: &'static [StepId],
}

const START_STEPS: &[SeedStep] = &[
    SeedStep {
        id: 1,
        name: "Привет 👋",
        message: "<p>Привет 👋</p>",
        sequence: 0,
        state: StepState::Done,
        kind: StepKind::NextStepName,
        next_step_ids: &[10],
    },
    SeedStep {
        id: 10,
        name: "Привет, а кто ты 🙂",
        message: "<p>Меня зовут Ева, и я являюсь лучшим специалистом в области сна 😌</p>",
        sequence: 9,
        state: StepState::Done,
        kind: StepKind::Nothing,
        next_step_ids: &[7234],
    },
    SeedStep {
        id: 7234,
        name: "О тебе",
        message: "<p>Я помогаю людям мягко засыпать, легче пробуждаться по утрам, побеждать дневную сонливость и чувствовать себя более энергичными ✨</p>",
        sequence: 10,
        state: StepState::NotRunning,
        kind: StepKind::Nothing,
        next_step_ids: &[7235],
    },
    SeedStep {
        id: 7235,
        name: "Исследования",
        message: "<p>Во мне собраны десятки самых действенных методов улучшения сна, основанных на 415 исследованиях и научных статьях 📚</p>",
        sequence: 11,
        state: StepState::NotRunning,
        kind: StepKind::NextStepName,
        next_step_ids: &[12],
    },
    SeedStep {
        id: 12,
        name: "Выглядит впечатляюще 🤩",
        message: "<p>Замечательно, в таком случае я предлагаю тебе пройти мой курс по улучшению сна 🌙</p>",
        sequence: 13,
        state: StepState::Done,
        kind: StepKind::Nothing,
        next_step_ids: &[7353],
    },
    SeedStep {
        id: 7353,
        name: "Что классное?",
        message: "<p>Знаешь, что в этом курсе самое классное 😎</p>",
        sequence: 14,
        state: StepState::NotRunning,
        kind: StepKind::Nothing,
        next_step_ids: &[7236],
    },
    SeedStep {
        id: 7236,
        name: "Эффективность",
        message: "<p>Я не буду читать лекции о том, что нужно спать больше. Вместо этого я покажу, как эффективно восстанавливать силы за то время, которое ты можешь уделять сну 😴</p>",
        sequence: 15,
        state: StepState::NotRunning,
        kind: StepKind::NextStepName,
        next_step_ids: &[13],
    },
    SeedStep {
        id: 13,
        name: "Запустить курс 🚀",
        message: "<p>Отлично, я буду рад работать с тобой в одной команде 😁</p>",
        sequence: 17,
        state: StepState::Done,
        kind: StepKind::Nothing,
        next_step_ids: &[7357],
    },
    SeedStep {
        id: 7357,
        name: "Подготовка",
        message: "<p>Нам предстоит пройти подготовку, и от этого этапа во многом будет зависеть успех нашего путешествия 🧑‍🚀</p>",
        sequence: 18,
        state: StepState::NotRunning,
        kind: StepKind::NextStepName,
        next_step_ids: &[17],
    },
    SeedStep {
        id: 17,
        name: "Поехали 🧑‍🚀",
        message: "<p>Во мне собраны сотни исследований о сне, поэтому я могу легко назвать эффективные методы и развеять все мифы. Но это не гарантирует результата 😔</p>",
        sequence: 19,
        state: StepState::NotRunning,
        kind: StepKind::Nothing,
        next_step_ids: &[],
    },
];

/// Follow-up script for each article, keyed by article id.
const ARTICLE_SCRIPTS: &[(u64, ScriptId)] = &[
    (41, 239), // Старт 🚀
    (42, 232), // Температура 🌡️
    (46, 186), // Ванна 🛁
    (47, 234), // Свет 💡
    (48, 484), // Подготовка к сну 🛏️
    (50, 485), // Питание 🍽
    (51, 486), // Вредные привычки 🥃
    (53, 487), // Кофе и чай ☕️
    (55, 488), // Основы КПТ ✨
    (58, 489), // Утяжеленные одеяла 😊
];

/// Build a fresh copy of the start script.
pub fn start_script() -> Script {
    let steps = START_STEPS
        .iter()
        .map(|s| {
            Step::new(
                s.id,
                s.name,
                s.message,
                s.sequence,
                s.state,
                s.kind,
                s.next_step_ids.to_vec(),
            )
        })
        .collect();

    Script::new(START_SCRIPT_ID, START_SCRIPT_NAME, ScriptState::Running, true)
        .with_next_script(START_NEXT_SCRIPT_ID)
        .with_steps(steps)
}

/// Follow-up script to chain into after reading an article.
///
/// ```rust
/// use eva_core::seed::script_id_for_article;
///
/// assert_eq!(script_id_for_article(42), Some(232));
/// assert_eq!(script_id_for_article(43), None);
/// ```
pub fn script_id_for_article(article_id: u64) -> Option<ScriptId> {
    ARTICLE_SCRIPTS
        .iter()
        .find(|(article, _)| *article == article_id)
        .map(|(_, script)| *script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_script_shape() {
        let script = start_script();
        assert_eq!(script.id, START_SCRIPT_ID);
        assert!(script.is_main);
        assert_eq!(script.state, ScriptState::Running);
        assert_eq!(script.next_script_id, Some(START_NEXT_SCRIPT_ID));
        assert_eq!(script.steps.len(), 10);
        assert!(script
            .steps
            .iter()
            .flat_map(|s| &s.next_step_ids)
            .all(|id| script.step(*id).is_some()));
    }

    #[test]
    fn test_start_script_edges() {
        let script = start_script();
        let edges: Vec<(StepId, Vec<StepId>)> = script
            .sorted_steps()
            .into_iter()
            .map(|s| (s.id, s.next_step_ids.clone()))
            .collect();
        assert_eq!(
            edges,
            vec![
                (1, vec![10]),
                (10, vec![7234]),
                (7234, vec![7235]),
                (7235, vec![12]),
                (12, vec![7353]),
                (7353, vec![7236]),
                (7236, vec![13]),
                (13, vec![7357]),
                (7357, vec![17]),
                (17, vec![]),
            ]
        );
    }

    #[test]
    fn test_first_pending_step_is_about() {
        let script = start_script();
        assert_eq!(script.next_pending_step().map(|s| s.id), Some(7234));
    }

    #[test]
    fn test_article_mapping_table() {
        assert_eq!(script_id_for_article(41), Some(239));
        assert_eq!(script_id_for_article(58), Some(489));
        assert_eq!(script_id_for_article(0), None);
        assert_eq!(ARTICLE_SCRIPTS.len(), 10);
    }
}
