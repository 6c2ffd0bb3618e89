/// Schema description sent ahead of every user prompt.
pub const SCHEMA_PREAMBLE: &str = r#"You draft monsters for a tabletop encounter builder.
Reply with a single JSON object describing one monster, shaped exactly like this:

{
  "name": "String",
  "type": "String (Humanoid, Beast, Undead, ...)",
  "level": Number (1-10),
  "role": "String (Minion, Standard, Elite, Solo, Leader, Artillery, Controller, Brute, Hexer, Ambusher, Defender, Support, Skirmisher)",
  "ev": Number (encounter value; about level * 3 for Standard, a quarter of that for Minion, double for Elite, quadruple for Solo),
  "stats": {
    "size": "String (1M, 1L, 2, ...)",
    "speed": Number,
    "stamina": Number,
    "stability": Number,
    "freeStrike": Number
  },
  "abilities": [
    {
      "name": "String",
      "icon": "String (one emoji)",
      "type": "String (Action, Maneuver, Triggered Action, Trait, Signature Ability, Villain Action)",
      "keywords": ["String"],
      "distance": "String (Melee 1, Ranged 10, ...)",
      "target": "String (One creature, ...)",
      "description": "String (markdown bold allowed)"
    }
  ]
}

Rules:
- Output the JSON object only. No code fences, no commentary.
- Balance ev and stats for the level and role.
- Offensive abilities use a power roll written as
  "**Power Roll + X**\n• **≤11:** tier 1 result\n• **12-16:** tier 2 result\n• **17+:** tier 3 result".
"#;

/// Full request text for `description`.
pub fn build_prompt(description: &str) -> String {
    format!("{SCHEMA_PREAMBLE}\n\nUser Description: {description}")
}
