/// Body of a successful upload, shaped the way the document service answers.
pub fn upload_response_fixture() -> &'static str {
    return r#"
{
  "message": "Memory index built with 4 chunks.",
  "summary": "**Cells** are the basic unit of life.",
  "quiz": [
    {
      "question": "What is the basic unit of life?",
      "options": ["Atom", "Cell", "Organ", "Tissue"],
      "answer": "Cell"
    },
    {
      "question": "Which organelle holds the genome?",
      "options": ["Nucleus", "Ribosome", "Vacuole", "Membrane"],
      "answer": "Nucleus"
    }
  ],
  "videos": [
    {
      "title": "Cell biology in 10 minutes",
      "url": "https://www.youtube.com/watch?v=abc",
      "thumbnail": "https://i.ytimg.com/vi/abc/hqdefault.jpg"
    }
  ],
  "raw_text": "Cells are the basic unit of life. The nucleus holds the genome.",
  "document_id": 7
}
"#
    .trim();
}

/// Body of a successful quiz page.
pub fn quiz_response_fixture() -> &'static str {
    return r#"
{
  "quiz": [
    {
      "question": "Which organelle produces energy?",
      "options": ["Mitochondria", "Golgi", "Lysosome", "Nucleus"],
      "answer": "Mitochondria"
    }
  ]
}
"#
    .trim();
}
