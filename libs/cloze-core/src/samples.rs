//! Built-in sample quizzes.
//!
//! Lines are stored the way the original decks were authored, wrapped in
//! `<p>` tags. The last science line is deliberately left unterminated.

pub const GENERAL_KNOWLEDGE: &str = r#"
    <p>The largest continent on Earth is [Asia].</p>
    <p>The capital city of Japan is [Tokyo].</p>
    <p>The Great Wall is located in [China].</p>
    <p>The fastest land animal is the [cheetah].</p>
    <p>The currency used in the United States is the [dollar].</p>
    <p>The country known for pyramids and pharaohs is [Egypt].</p>
    <p>The longest river in the world is the [Nile].</p>
    <p>The planet known as the Red Planet is [Mars].</p>
    <p>The main language spoken in Brazil is [Portuguese].</p>
    <p>The highest mountain in the world is [Mount Everest].</p>
"#;

pub const SCIENCE: &str = r#"
    <p>Water freezes at [0] degrees Celsius.</p>
    <p>The chemical symbol for gold is [Au].</p>
    <p>The human body has [206] bones.</p>
    <p>The process by which plants make food is called [photosynthesis].</p>
    <p>The largest planet in our solar system is [Jupiter].</p>
    <p>Sound travels fastest in [solids].</p>
    <p>The powerhouse of the cell is the [mitochondria].</p>
    <p>Lightning is caused by [static electricity].</p>
    <p>The main gas in Earth's atmosphere is [nitrogen].</p>
    <p>The first element on the periodic table is [hydrogen</p>
"#;

pub const POP_CULTURE: &str = r#"
    <p>The superhero who swings between buildings in New York is [Spider-Man].</p>
    <p>The boy wizard who attends Hogwarts is [Harry Potter].</p>
    <p>The Roblox game where players survive natural disasters on different maps is [Natural Disaster Survival].</p>
    <p>Billionaire who owns Facebook is [Mark Zuckerberg].</p>
    <p>Billionaire who owns Twitter is [Elon Musk].</p>
    <p>The movie where a lion cub becomes king is [The Lion King].</p>
    <p>The Norse god of thunder is [Thor].</p>
    <p>The main character in the game series “The Legend of Zelda” is [Link].</p>
    <p>The cartoon character who lives in a pineapple under the sea is [SpongeBob].</p>
    <p>OpenAI owns [ChatGPT] while Meta owns [Meta AI].</p>
"#;

/// Sample names and their text.
pub const SAMPLES: &[(&str, &str)] = &[
    ("general-knowledge", GENERAL_KNOWLEDGE),
    ("science", SCIENCE),
    ("pop-culture", POP_CULTURE),
];

/// Look up a sample by name.
pub fn get_sample(name: &str) -> Option<&'static str> {
    SAMPLES
        .iter()
        .find(|(sample, _)| *sample == name)
        .map(|(_, text)| *text)
}
