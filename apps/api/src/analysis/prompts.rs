// All LLM prompt templates for the analysis module.
// Placeholders are filled with `llm_client::prompts::render_template`.

/// Free-text job description from a bare title. Placeholders: `{job_title}`, `{level}`.
pub const JOB_REQUIREMENTS_PROMPT_TEMPLATE: &str = r#"Bayangkan Anda seorang talent acquisition / HR senior dengan pengalaman 30 tahun di berbagai jenis perusahaan.
Berikan job requirements dan job description yang umum untuk posisi {job_title} di level {level}.

Susun job description yang komprehensif dan realistis, mencakup:
1. Job Overview/Summary
2. Key Responsibilities (minimal 5-8 poin)
3. Required Skills (Technical, Soft Skills, Tools)
4. Education Requirements
5. Experience Requirements
6. Preferred Qualifications/Nice to Have
7. Salary Range (estimasi yang realistis)
8. Job Type (Full-time/Part-time/Contract)

Gunakan bahasa Indonesia yang profesional dan sesuaikan dengan level {level}.
Berikan detail yang cukup untuk dianalisis terhadap CV kandidat."#;

/// Structured job analysis. Placeholders: `{level}`, `{job_text}`, `{json_only}`.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Kamu adalah HR expert dan job analyst dengan pengalaman lebih dari 30 tahun di berbagai bidang perusahaan.
Analisis job role berikut untuk level {level}.

**Job Role Content:**
{job_text}

**Level:** {level}

Berikan analisis dalam format JSON dengan struktur berikut:

{
    "job_analysis": {
        "title": "extracted or inferred job title",
        "company": "company name if mentioned",
        "level": "{level}",
        "location": "location if mentioned or 'Not specified'",
        "job_type": "Full-time/Part-time/Contract/Internship",
        "salary_range": "salary range if mentioned or 'Not specified'",
        "description": "brief job description summary"
    },
    "required_skills": [
        {"skill_category": "Technical Skills", "skills": ["skill1", "skill2", "skill3"]},
        {"skill_category": "Soft Skills", "skills": ["skill1", "skill2", "skill3"]},
        {"skill_category": "Tools & Technologies", "skills": ["tool1", "tool2", "tool3"]}
    ],
    "requirements": {
        "education": "education requirements",
        "experience": "experience requirements",
        "certifications": "certification requirements if any",
        "languages": "language requirements if any"
    },
    "responsibilities": ["responsibility 1", "responsibility 2", "responsibility 3"],
    "nice_to_have": ["nice to have skill/experience 1", "nice to have skill/experience 2"]
}

{json_only}
Gunakan bahasa Indonesia untuk deskripsi dan bahasa Inggris untuk nama skill."#;

/// CV-vs-job evaluation. Placeholders: `{cv_text}`, `{job_requirements}`, `{json_only}`.
pub const CV_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Kamu adalah HR expert dan career consultant dengan pengalaman lebih dari 30 tahun di berbagai jenis perusahaan.
Analisis CV berikut terhadap job requirements yang spesifik.

**CV Content:**
{cv_text}

**Job Requirements:**
{job_requirements}

Nilai CV terhadap job requirements di atas dan berikan hasil dalam format JSON dengan struktur berikut:

{
    "resume_evaluation_matrix": [
        {"kriteria": "Clarity & Structure", "skor": <1-10>, "catatan": "penjelasan detail"},
        {"kriteria": "Relevance to Target Role", "skor": <1-10>, "catatan": "seberapa relevan dengan job requirements"},
        {"kriteria": "Impact & Achievement", "skor": <1-10>, "catatan": "penjelasan detail"},
        {"kriteria": "Language & Grammar", "skor": <1-10>, "catatan": "penjelasan detail"},
        {"kriteria": "ATS Compatibility", "skor": <1-10>, "catatan": "penjelasan detail"},
        {"kriteria": "Design & Visual Appeal", "skor": <1-10>, "catatan": "penjelasan detail"},
        {"kriteria": "Length Appropriateness", "skor": <1-10>, "catatan": "penjelasan detail"},
        {"kriteria": "Job Requirements Match", "skor": <1-10>, "catatan": "seberapa match dengan requirements job"}
    ],
    "skill_gap_analysis": [
        {
            "skill_area": "nama area skill dari job requirements",
            "required_skill": "detail skill yang dibutuhkan dari job posting",
            "found_in_resume": "yes/no/partial",
            "skill_gap": <0-5>,
            "catatan": "penjelasan gap dan saran improvement"
        }
    ],
    "job_readiness_index": [
        {"aspect": "Relevansi Pengalaman Kerja", "skor": <1-10>, "catatan": "relevansi pengalaman dengan job requirements"},
        {"aspect": "Kesesuaian Skill", "skor": <1-10>, "catatan": "kesesuaian skill dengan yang diminta di job posting"},
        {"aspect": "Education & Certification Match", "skor": <1-10>, "catatan": "kesesuaian pendidikan dan sertifikasi"},
        {"aspect": "Resume Readiness", "skor": <1-10>, "catatan": "kesiapan resume untuk melamar job ini"},
        {"aspect": "Interview Preparedness", "skor": <1-10>, "catatan": "kesiapan interview berdasarkan job requirements"}
    ]
}

{json_only}
Gunakan bahasa Indonesia yang mudah dipahami, berikan penilaian yang objektif dan konstruktif.
Fokus pada kesesuaian antara CV dengan job requirements yang spesifik."#;
