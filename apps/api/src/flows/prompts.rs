// All prompt templates for the guidance flows.
// Placeholders are `{name}` and are filled with `str::replace` in each flow's `render`.
// Role strings are combined with llm_client::prompts::JSON_ONLY_SYSTEM by the invoker.

// ── Stream recommendation ───────────────────────────────────────────────────

pub const STREAM_ROLE: &str = "You are an experienced academic counsellor who helps \
    students who have finished 10th grade choose between the Science, Commerce and Arts streams.";

/// Replace: {marks}, {test_score}
pub const STREAM_PROMPT_TEMPLATE: &str = r#"Recommend the most suitable 11th-grade stream for this student.

10TH-GRADE MARKS (out of 100):
{marks}

{test_score}

Return a JSON object with this EXACT schema:
{
  "recommendedStream": "Science" | "Commerce" | "Arts",
  "reasoning": "Two to four sentences tying the recommendation to the marks above",
  "careerPaths": ["Career the stream leads to", "Another career"]
}

Rules:
- Pick exactly one stream.
- Base the reasoning only on the marks and score provided.
- List between 3 and 6 career paths."#;

// ── Degree courses ──────────────────────────────────────────────────────────

pub const DEGREE_ROLE: &str = "You are an experienced admissions counsellor who recommends \
    undergraduate degree courses to students who have completed 12th grade.";

/// Replace: {stream}, {subjects}, {interests}
pub const DEGREE_PROMPT_TEMPLATE: &str = r#"Recommend undergraduate degree courses for this student.

12TH-GRADE STREAM: {stream}

SUBJECT MARKS (out of 100):
{subjects}

STATED INTERESTS: {interests}

Return a JSON object with this EXACT schema:
{
  "courses": [
    {
      "name": "B.Sc. Computer Science",
      "description": "What the course covers and why it suits the student",
      "careerProspects": ["Software Engineer", "Data Analyst"],
      "eligibility": "Typical eligibility requirement (optional)"
    }
  ],
  "advice": "One short paragraph of overall advice (optional)"
}

Rules:
- Recommend between 3 and 5 courses, strongest fit first.
- Only recommend courses the student is plausibly eligible for given the stream."#;

// ── Assessment generation ───────────────────────────────────────────────────

pub const ASSESSMENT_ROLE: &str = "You are an expert educator who writes fair, unambiguous \
    multiple-choice aptitude and knowledge assessments.";

/// Replace: {topic}, {level}, {count}
pub const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"Write a multiple-choice assessment.

TOPIC: {topic}
DIFFICULTY: {level}
NUMBER OF QUESTIONS: {count}

Return a JSON object with this EXACT schema:
{
  "questions": [
    {
      "question": "The question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "Option B",
      "explanation": "Why the answer is correct (optional)"
    }
  ]
}

HARD RULES:
1. Produce exactly {count} questions.
2. Every question has exactly 4 distinct options.
3. `correctAnswer` MUST be copied verbatim from that question's `options`.
4. Exactly one option is correct."#;

// ── Assessment evaluation ───────────────────────────────────────────────────

pub const EVALUATION_ROLE: &str = "You are a supportive academic mentor who interprets \
    assessment results and gives students actionable feedback.";

/// Replace: {topic}, {score}, {answers}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate this student's assessment attempt.

TOPIC: {topic}
SCORE: {score}

ANSWERS (each with the correct answer and what the student chose; null means skipped):
{answers}

Return a JSON object with this EXACT schema:
{
  "summary": "Two or three sentences on overall performance",
  "strengths": ["Concept the student clearly understands"],
  "areasForImprovement": ["Concept the student should revisit"],
  "recommendedTopics": ["Specific topic to study next"]
}"#;

// ── Career recommendations ──────────────────────────────────────────────────

pub const CAREER_ROLE: &str = "You are an experienced career counsellor who matches people \
    to realistic career options based on their education, skills and interests.";

/// Replace: {profile}
pub const CAREER_PROMPT_TEMPLATE: &str = r#"Recommend careers for the person described below.

PROFILE:
{profile}

Return a JSON object with this EXACT schema:
{
  "recommendations": [
    {
      "title": "Data Analyst",
      "description": "What the role involves and why it fits this person",
      "matchScore": 85,
      "requiredSkills": ["SQL", "Statistics"],
      "growthOutlook": "Short note on demand and growth (optional)"
    }
  ]
}

Rules:
- Recommend between 3 and 5 careers, best match first.
- `matchScore` is a number from 0 to 100.
- Ground every recommendation in the profile; do not assume skills that are not listed."#;

// ── Resume generation ───────────────────────────────────────────────────────

pub const RESUME_ROLE: &str = "You are an expert resume writer who turns raw profile details \
    into a concise, professional, ATS-friendly resume.";

/// Replace: {details}, {target_role}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Write resume content from the details below.

TARGET ROLE: {target_role}

CANDIDATE DETAILS:
{details}

Return a JSON object with this EXACT schema:
{
  "professionalSummary": "Three or four sentence summary",
  "experience": [
    {
      "company": "Company name, copied from the details",
      "role": "Role title, copied from the details",
      "duration": "Jan 2022 - Present",
      "bullets": ["Action-verb bullet describing an achievement"]
    }
  ],
  "education": [
    {
      "institution": "Institution name",
      "qualification": "Degree or certificate",
      "duration": "2018 - 2022 (optional)",
      "grade": "Grade if provided (optional)"
    }
  ],
  "skills": ["Skill"],
  "projects": [
    {"name": "Project name", "description": "One-sentence description"}
  ]
}

HARD RULES:
1. Use ONLY facts present in the candidate details. Never invent employers, dates, grades or metrics.
2. Include one `experience` entry per work experience provided, in the same order.
3. Omit `projects` entirely if no projects were provided.
4. Two to four bullets per experience entry."#;

// ── Resume review ───────────────────────────────────────────────────────────

pub const REVIEW_ROLE: &str = "You are a senior recruiter who reviews resumes the way an \
    applicant tracking system and a hiring manager would.";

/// Replace: {target_role}, {resume_text}
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"Review the resume below.

TARGET ROLE: {target_role}

RESUME:
{resume_text}

Return a JSON object with this EXACT schema:
{
  "overallScore": 72,
  "summary": "Two or three sentence verdict",
  "strengths": ["What the resume does well"],
  "improvements": ["Specific, actionable change"],
  "missingKeywords": ["Keyword expected for the target role (optional)"]
}

Rules:
- `overallScore` is a number from 0 to 100.
- Every improvement must point at something concrete in the resume."#;

// ── Career roadmap ──────────────────────────────────────────────────────────

pub const ROADMAP_ROLE: &str = "You are a career coach who lays out practical, step-by-step \
    learning and experience roadmaps toward a target career.";

/// Replace: {target_career}, {current_level}, {timeframe}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Build a career roadmap.

TARGET CAREER: {target_career}
CURRENT LEVEL: {current_level}
TIMEFRAME: {timeframe}

Return a JSON object with this EXACT schema:
{
  "career": "The target career",
  "overview": "Short description of the path",
  "milestones": [
    {
      "title": "Milestone name",
      "duration": "e.g. 2 months",
      "description": "What to do and why",
      "resources": ["Course, book or activity"]
    }
  ]
}

Rules:
- Between 4 and 8 milestones, in the order they should be done.
- Milestone durations must add up to roughly the timeframe."#;

// ── Skill gap ───────────────────────────────────────────────────────────────

pub const SKILL_GAP_ROLE: &str = "You are a technical hiring advisor who compares a person's \
    current skills against the expectations for a target role.";

/// Replace: {target_role}, {skills}
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"Analyse the skill gap for this person.

TARGET ROLE: {target_role}

CURRENT SKILLS:
{skills}

Return a JSON object with this EXACT schema:
{
  "matchingSkills": ["Current skill that is relevant to the role"],
  "missingSkills": [
    {
      "skill": "Skill the role expects",
      "importance": "high" | "medium" | "low",
      "learningResources": ["Where to learn it"]
    }
  ],
  "summary": "Two or three sentence overview"
}

Rules:
- `matchingSkills` may only contain skills from the CURRENT SKILLS list.
- Order `missingSkills` from most to least important."#;

/// Renders a list of strings as bullet lines for a prompt.
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
