//
// ─── SECTION CATALOG ──────────────────────────────────────────────────────────
//

/// One fixed content unit of the journey.
///
/// Sections are compiled in and never created or destroyed at runtime.
/// Progress records on the server refer to a section by its `title`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub estimated_minutes: u32,
    pub key_verses: &'static [&'static str],
    pub reflection_question: &'static str,
    pub content: &'static str,
}

/// Number of sections in a complete journey.
pub const SECTION_COUNT: usize = 6;

static SECTIONS: [Section; SECTION_COUNT] = [
    Section {
        id: "creation",
        title: "Creation",
        description: "In the beginning, God created everything perfect and good",
        estimated_minutes: 30,
        key_verses: &["Genesis 1:1", "Genesis 1:27", "Genesis 2:7", "Genesis 3:15"],
        reflection_question: "What does it mean to you that you are created in God's image?",
        content: "In the beginning God created the heavens and the earth... So God created mankind in his own image, in the image of God he created them; male and female he created them. Then the Lord God formed a man from the dust of the ground and breathed into his nostrils the breath of life, and the man became a living being.",
    },
    Section {
        id: "fall_promise",
        title: "Fall & Promise",
        description: "Humanity's rebellion and God's promise of redemption through Abraham",
        estimated_minutes: 45,
        key_verses: &["Genesis 12:1-3", "Exodus 20:1-17", "Isaiah 53:4-6"],
        reflection_question: "How do you see God's faithfulness despite human failure in your own life?",
        content: "Now the Lord had said to Abram: \"Get out of your country, from your family and from your father's house, to a land that I will show you. I will make you a great nation; I will bless you and make your name great; and you shall be a blessing.\"",
    },
    Section {
        id: "kings_prophets",
        title: "Kings & Prophets",
        description: "God's chosen leaders and messengers prepare the way",
        estimated_minutes: 50,
        key_verses: &["1 Samuel 16:7", "Psalm 23:1", "Isaiah 9:6"],
        reflection_question: "What does it mean that God looks at the heart rather than outward appearance?",
        content: "But the Lord said to Samuel, \"Do not look at his appearance or at his physical stature, because I have refused him. For the Lord does not see as man sees; for man looks at the outward appearance, but the Lord looks at the heart.\"",
    },
    Section {
        id: "christ_messiah",
        title: "Christ the Messiah",
        description: "Jesus - the promised Savior arrives, lives, dies, and rises again",
        estimated_minutes: 90,
        key_verses: &["Luke 2:10-11", "Matthew 5:3-4", "John 1:14", "John 19:30"],
        reflection_question: "How does knowing Jesus personally change how you live each day?",
        content: "Then the angel said to them, \"Do not be afraid, for behold, I bring you good tidings of great joy which will be to all people. For there is born to you this day in the city of David a Savior, who is Christ the Lord.\"",
    },
    Section {
        id: "church_born",
        title: "Church Born",
        description: "The Holy Spirit empowers believers to spread the Gospel worldwide",
        estimated_minutes: 60,
        key_verses: &["Acts 2:1-4", "Romans 8:28", "Ephesians 2:8-9"],
        reflection_question: "What role do you feel called to play in God's mission in the world?",
        content: "When the Day of Pentecost had fully come, they were all with one accord in one place. And suddenly there came a sound from heaven, as of a rushing mighty wind, and it filled the whole house where they were sitting.",
    },
    Section {
        id: "future_hope",
        title: "Future Hope",
        description: "God's ultimate victory and the promise of new heaven and new earth",
        estimated_minutes: 30,
        key_verses: &["Revelation 21:1-4", "Revelation 22:20"],
        reflection_question: "How does the promise of God's perfect future give you hope today?",
        content: "Now I saw a new heaven and a new earth, for the first heaven and the first earth had passed away. Also there was no more sea. Then I, John, saw the holy city, New Jerusalem, coming down out of heaven from God, prepared as a bride adorned for her husband.",
    },
];

/// The ordered section catalog.
#[must_use]
pub fn sections() -> &'static [Section] {
    &SECTIONS
}

/// Section at a zero-based position, if any.
#[must_use]
pub fn section_at(index: usize) -> Option<&'static Section> {
    SECTIONS.get(index)
}

/// Index of the last section in the catalog.
#[must_use]
pub const fn last_section_index() -> usize {
    SECTION_COUNT - 1
}

impl Section {
    /// Key verses joined for display (`"Genesis 1:1, Genesis 1:27"`).
    #[must_use]
    pub fn key_verses_joined(&self) -> String {
        self.key_verses.join(", ")
    }
}
