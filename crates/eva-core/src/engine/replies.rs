//! Fixed assistant replies.

/// Posted when a user answer has no matching continuation.
pub const STAGE_COMPLETE: &str =
    "Отлично! Мы завершили этот этап. Продолжай изучать материалы в разделе Статьи! 🎉";

pub const SLEEP_REPLY: &str =
    "Хороший сон важен для здоровья. Ты уже проверил свой вечерний ритуал сегодня?";
pub const RITUAL_REPLY: &str = "Твой ритуал помогает подготовить тело и разум к качественному сну. Не забывай выполнять все шаги!";
pub const ARTICLE_REPLY: &str =
    "Рекомендую заглянуть в раздел Статьи. Там много полезной информации об улучшении сна!";
pub const HELP_REPLY: &str = "Я здесь, чтобы помочь тебе улучшить качество сна. Можешь спросить меня о советах по сну, ритуалах или почитать наши статьи.";
pub const GREETING_REPLY: &str =
    "Привет! 👋 Я Ева, твой персональный ассистент по улучшению сна. Чем могу помочь?";
pub const FALLBACK_REPLY: &str =
    "Я получила твоё сообщение. Чем могу помочь сегодня в улучшении твоего сна?";

/// Topics checked in order; the first topic with a keyword contained in the
/// lowercased message wins.
const TOPICS: &[(&[&str], &str)] = &[
    (&["sleep", "сон"], SLEEP_REPLY),
    (&["ritual", "ритуал"], RITUAL_REPLY),
    (&["article", "статья", "статьи"], ARTICLE_REPLY),
    (&["help", "помощь", "помоги"], HELP_REPLY),
    (&["привет", "hello", "hi"], GREETING_REPLY),
];

/// Reply to a message typed while no script step is active.
///
/// Matching is by substring, so "this" counts as a greeting.
///
/// ```rust
/// use eva_core::engine::replies::{canned_reply, RITUAL_REPLY};
///
/// assert_eq!(canned_reply("Мой РИТУАЛ"), RITUAL_REPLY);
/// ```
pub fn canned_reply(message: &str) -> &'static str {
    let lowercased = message.to_lowercase();
    TOPICS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowercased.contains(k)))
        .map_or(FALLBACK_REPLY, |(_, reply)| *reply)
}
