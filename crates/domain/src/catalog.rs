//! Built-in question catalog
//!
//! The catalog is read-only reference data: every built-in prompt tagged
//! with its mode, plus the single wildcard sentinel that the wildcard
//! mechanic substitutes for a dealt card.

use crate::entities::Question;
use crate::types::GameMode;

/// Text of the wildcard sentinel card
pub const WILDCARD_TEXT: &str = "Make up your own question!";

/// Wildcards each player starts a round with
pub const INITIAL_WILDCARDS: u8 = 3;

/// Light, funny openers forced to the front of a fresh First Date deck so
/// the table warms up before deeper prompts appear.
pub const FIRST_DATE_ICEBREAKERS: &[&str] = &[
    "Would you rather go on a great date with someone who disappears or a boring date with someone who won’t stop texting you?",
    "What's your spirit animal? Why?",
    "You can delete one dating behavior from the planet. What vanishes?",
    "Is there a song that immediately lifts your mood? Which one?",
    "If there was a Google review for dating you, what would it say?",
];

const BUILTIN_QUESTIONS: &[(GameMode, &str)] = &[
    (GameMode::FirstDate, "What's your biggest ick?"),
    (GameMode::FirstDate, "How long do you know your best friend?"),
    (GameMode::FirstDate, "Is there a song that immediately lifts your mood? Which one?"),
    (GameMode::FirstDate, "What gives you the ick, no matter how attractive they are?"),
    (GameMode::FirstDate, "What are your goals for this year?"),
    (GameMode::FirstDate, "What is your favorite feature about yourself?"),
    (GameMode::FirstDate, "How do you like to spend your alone time?"),
    (GameMode::FirstDate, "If there was a Google review for dating you, what would it say?"),
    (GameMode::FirstDate, "What's the funniest way someone has tried to seduce you?"),
    (GameMode::FirstDate, "Name three things you like about your partner."),
    (GameMode::FirstDate, "What is your love language for both giving and receiving love? (Physical Touch, Words of Affirmation, Quality Time, Acts of Service, Receiving Gifts)."),
    (GameMode::FirstDate, "What do you value most in a friendship?"),
    (GameMode::FirstDate, "What was your first impression of me? Digital and in real life."),
    (GameMode::FirstDate, "Describe your idea of a perfect day."),
    (GameMode::FirstDate, "On a scale of 1 to 10, how would you rate yourself?"),
    (GameMode::FirstDate, "If you received €10,000, how would you spend it?"),
    (GameMode::SecondDate, "What's your Roman Empire?"),
    (GameMode::SecondDate, "What's a deeply held dream you have?"),
    (GameMode::SecondDate, "What does your five year plan look like?"),
    (GameMode::SecondDate, "What were the major turning points in your life?"),
    (GameMode::SecondDate, "What lie have you told yourself so much that you now believe it?"),
    (GameMode::SecondDate, "Is there anyone you look up to? Who and why?"),
    (GameMode::SecondDate, "What's your biggest fear?"),
    (GameMode::SecondDate, "How do you define success?"),
    (GameMode::SecondDate, "What's something you wish I did more often?"),
    (GameMode::SecondDate, "What were you like as a student?"),
    (GameMode::SecondDate, "What's the most embarrassing that has happened to you?"),
    (GameMode::SecondDate, "What did you want to be when you grew up?"),
    (GameMode::SecondDate, "Which personal accomplishment are you most proud of? Why?"),
    (GameMode::ThirdDate, "When was the last time a scent reminded you of a childhood memory? Share that story with me."),
    (GameMode::ThirdDate, "When do you feel the most insecure?"),
    (GameMode::ThirdDate, "If you could relive one year of your life, which would it be and why?"),
    (GameMode::ThirdDate, "What's something you wish you were really good at?"),
    (GameMode::ThirdDate, "Both write down your three most important values in life. Compare."),
    (GameMode::ThirdDate, "Describe yourself in three words."),
    (GameMode::ThirdDate, "What does your dream house look like? Where is it?"),
    (GameMode::ThirdDate, "If you could give one piece of advice to your younger self, what would it be?"),
    (GameMode::ThirdDate, "How have you changed in the past five years?"),
    (GameMode::ThirdDate, "What did you learn about money from your parents?"),
    (GameMode::LoveBirds, "What feelings are hard for you to communicate? How can I make it easier?"),
    (GameMode::LoveBirds, "Do you ever feel jealous if you see me talking to other attractive people?"),
    (GameMode::LoveBirds, "What's the best thing you inherited from each of your parents?"),
    (GameMode::LoveBirds, "Is there someone to whom you owe an apology? What for?"),
    (GameMode::LoveBirds, "When you experience stress how do you like to be supported?"),
    (GameMode::LoveBirds, "What's something you love about your hometown?"),
    (GameMode::LoveBirds, "Express gratitude for the person you're with. Why are you thankful for them?"),
    (GameMode::LoveBirds, "What boundaries can we set to protect our relationship and communication from being damaged by technology?"),
    (GameMode::LoveBirds, "What's something I introduced you to that you now enjoy?"),
    (GameMode::LoveBirds, "Is there something you've always wanted to do? What's stopped you?"),
    (GameMode::LoveBirds, "What was the most recent experience that made you feel closer to me?"),
    (GameMode::GroupMode, "Who was the best sexual partner you ever had?"),
    (GameMode::GroupMode, "If you had to trade lives with someone in this room, who would it be and why?"),
    (GameMode::GroupMode, "What's a secret you've never told anyone here?"),
    (GameMode::GroupMode, "What's the most illegal thing you've ever done?"),
    (GameMode::GroupMode, "Who in this room would survive the longest in a zombie apocalypse?"),
    (GameMode::GroupMode, "Describe a turn-on you haven't shared with me yet."),
    (GameMode::GroupMode, "What's your favourite time of day for sex?"),
    (GameMode::GroupMode, "Which celebrity would you choose if you had a free pass to sleep with anyone?"),
    (GameMode::GroupMode, "Would you rather have the ability to read minds or be invisible?"),
    (GameMode::GroupMode, "Would you rather have your browser history made public or your bank account balance displayed above your head?"),
    (GameMode::GroupMode, "Would you rather only be able to whisper or only be able to shout for the rest of your life?"),
    (GameMode::GroupMode, "Would you rather fight one horse-sized duck or 100 duck-sized horses?"),
    (GameMode::GroupMode, "Would you rather know the date of your death or the cause of your death?"),
    (GameMode::GroupMode, "Would you rather have unlimited money but no close relationships, or amazing relationships but always struggle financially?"),
    (GameMode::GroupMode, "Would you rather always be 10 minutes late or 20 minutes early to everything?"),
    (GameMode::GroupMode, "Would you rather have to sing everything you say or dance everywhere you go?"),
    (GameMode::GroupMode, "On a scale of 1-10, how likely are you to survive a horror movie? Explain your strategy."),
    (GameMode::GroupMode, "Rate everyone in this room from 1-10 on who would make the best reality TV star. Explain why."),
    (GameMode::GroupMode, "On a scale of 1-10, how much of a risk-taker are you? Give an example."),
    (GameMode::GroupMode, "Rate your cooking skills from 1-10. What's the most impressive dish you can make?"),
    (GameMode::GroupMode, "On a scale of 1-10, how good are you at keeping secrets? Has anyone here tested this?"),
    (GameMode::GroupMode, "Rate your texting game from 1-10. Are you a quick replier or do you leave people on read?"),
    (GameMode::GroupMode, "On a scale of 1-10, how competitive are you? What brings out your competitive side the most?"),
    (GameMode::GroupMode, "Rate your dance moves from 1-10. Show us your signature move!"),
    (GameMode::GroupMode, "On a scale of 1-10, how likely are you to eat something that fell on the floor? Does the 5-second rule apply?"),
    (GameMode::GroupMode, "Rate your ability to lie convincingly from 1-10. Tell us a lie right now and see if we can guess!"),
];

/// Read-only question source for selection and requests
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    wildcard: Question,
}

impl QuestionCatalog {
    /// The catalog shipped with the game
    pub fn builtin() -> Self {
        let questions = BUILTIN_QUESTIONS
            .iter()
            .map(|(mode, text)| Question::new(*text, *mode))
            .collect();
        Self::from_parts(questions, Question::wildcard(WILDCARD_TEXT))
    }

    /// Build a catalog from arbitrary prompts. Wildcard-typed entries in
    /// `questions` are dropped; the sentinel is held separately.
    pub fn from_parts(questions: Vec<Question>, wildcard: Question) -> Self {
        Self {
            questions: questions.into_iter().filter(|q| !q.is_wildcard()).collect(),
            wildcard,
        }
    }

    /// Every regular prompt, in catalog order
    pub fn all_questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn by_mode(&self, mode: GameMode) -> impl Iterator<Item = &Question> + '_ {
        self.questions.iter().filter(move |q| q.belongs_to(mode))
    }

    /// The wildcard sentinel
    pub fn wildcard(&self) -> &Question {
        &self.wildcard
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Whether `text` is one of the curated First Date openers
pub fn is_icebreaker(text: &str) -> bool {
    FIRST_DATE_ICEBREAKERS.contains(&text)
}
