//! Application form builder
//!
//! Maps a validated application onto the multi-part body the ATS
//! `applicationForm.submit` endpoint expects:
//!
//! | part              | content                                        |
//! |-------------------|------------------------------------------------|
//! | `jobPostingId`    | the posting id                                 |
//! | `applicationForm` | `{"fieldSubmissions": [{path, value}, ...]}`   |
//! | `resume_file`     | résumé bytes, sanitized filename, declared MIME |

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::json;

use super::UpstreamError;
use crate::error::ProxyError;
use crate::models::{ApplicationRequest, ResumeUpload};
use crate::validation::resume::{decode_resume, is_allowed_resume_type, ResumeDecodeError};

/// Form field paths in the ATS application form.
///
/// `_systemfield_*` paths are stable ATS names. The UUID paths are assigned
/// by the ATS when the custom questions were added to the form and must be
/// updated if the form is rebuilt.
pub mod schema {
    pub const NAME: &str = "_systemfield_name";
    pub const EMAIL: &str = "_systemfield_email";
    pub const RESUME: &str = "_systemfield_resume";
    /// "LinkedIn URL" question
    pub const LINKEDIN: &str = "6dd7d493-5687-4ffd-b7f3-ee9fd8f87b04";
    /// "Tell us about a project" question
    pub const PROJECT_NOTE: &str = "20c3128e-1abb-4d7c-bbad-62932b8e2600";
    /// "GitHub Profile" question, not asked on every posting
    pub const GITHUB: &str = "78a43fa2-1534-419f-a45c-61b72c904059";
}

/// Multi-part field carrying the résumé; also the value of the
/// `_systemfield_resume` submission that points at it.
pub const RESUME_FILE_FIELD: &str = "resume_file";

const MAX_FILENAME_CHARS: usize = 100;
const DEFAULT_FILENAME: &str = "resume.pdf";

// == Field Submission ==
/// One `{path, value}` pair in the `applicationForm` JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSubmission {
    pub path: &'static str,
    /// Absent values are left out of the JSON rather than sent as `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldSubmission {
    fn new(path: &'static str, value: Option<&str>) -> Self {
        Self {
            path,
            value: value.map(str::to_string),
        }
    }
}

// == Resume Attachment ==
/// A decoded résumé ready to be attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeAttachment {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl ResumeAttachment {
    /// Decodes and re-checks an upload.
    ///
    /// The validator has already run; this repeats the size and type checks
    /// on the bytes that will actually be sent.
    pub fn from_upload(upload: &ResumeUpload) -> Result<Self, ProxyError> {
        let data = upload.data.as_deref().unwrap_or_default();

        let bytes = decode_resume(data).map_err(|e| match e {
            ResumeDecodeError::TooLarge(size) => {
                ProxyError::ResumeProcessing(format!("File too large: {size} bytes"))
            }
            ResumeDecodeError::Malformed => {
                ProxyError::ResumeProcessing("File content is not valid base64".to_string())
            }
        })?;

        let mime_type = upload.mime_type.as_deref().unwrap_or_default();
        if !is_allowed_resume_type(Some(mime_type)) {
            return Err(ProxyError::ResumeProcessing(format!(
                "Invalid file type: {mime_type}"
            )));
        }

        Ok(Self {
            bytes,
            file_name: sanitize_filename(upload.name.as_deref()),
            mime_type: mime_type.to_string(),
        })
    }
}

/// Replaces every character outside `[A-Za-z0-9.-]` with `_` and keeps at
/// most 100 characters.
pub fn sanitize_filename(name: Option<&str>) -> String {
    let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_FILENAME);
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_CHARS)
        .collect()
}

// == Application Form ==
/// The complete upstream submission for one application.
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    pub job_posting_id: String,
    pub field_submissions: Vec<FieldSubmission>,
    pub resume: Option<ResumeAttachment>,
}

impl ApplicationForm {
    pub fn builder(job_posting_id: impl Into<String>) -> ApplicationFormBuilder {
        ApplicationFormBuilder {
            job_posting_id: job_posting_id.into(),
            name: None,
            email: None,
            linkedin: None,
            project_note: None,
            github: None,
            resume: None,
        }
    }

    /// Builds the form for a request that already passed validation.
    pub fn from_request(req: &ApplicationRequest) -> Result<Self, ProxyError> {
        let resume = req
            .resume
            .as_ref()
            .filter(|r| r.data.as_deref().is_some_and(|d| !d.is_empty()))
            .map(ResumeAttachment::from_upload)
            .transpose()?;

        let mut builder = ApplicationForm::builder(req.job_posting_id.as_deref().unwrap_or_default())
            .name(req.name.as_deref())
            .email(req.email.as_deref())
            .linkedin(req.linkedin.as_deref())
            .project_note(req.project_note.as_deref())
            .github(req.github.as_deref());
        if let Some(resume) = resume {
            builder = builder.resume(resume);
        }

        Ok(builder.build())
    }

    /// Paths in submission order, for logging without values.
    pub fn paths(&self) -> Vec<&'static str> {
        self.field_submissions.iter().map(|f| f.path).collect()
    }

    /// The `applicationForm` part.
    pub fn application_form_json(&self) -> String {
        json!({ "fieldSubmissions": self.field_submissions }).to_string()
    }

    /// Converts into the multi-part body.
    pub fn into_multipart(self) -> Result<Form, UpstreamError> {
        let application_form = self.application_form_json();

        let mut form = Form::new()
            .text("jobPostingId", self.job_posting_id)
            .text("applicationForm", application_form);

        if let Some(resume) = self.resume {
            let part = Part::bytes(resume.bytes)
                .file_name(resume.file_name)
                .mime_str(&resume.mime_type)
                .map_err(|e| UpstreamError::Request(e.to_string()))?;
            form = form.part(RESUME_FILE_FIELD, part);
        }

        Ok(form)
    }
}

// == Builder ==
/// Collects field values and emits submissions in the fixed schema order.
#[derive(Debug)]
pub struct ApplicationFormBuilder {
    job_posting_id: String,
    name: Option<String>,
    email: Option<String>,
    linkedin: Option<String>,
    project_note: Option<String>,
    github: Option<String>,
    resume: Option<ResumeAttachment>,
}

impl ApplicationFormBuilder {
    pub fn name(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }

    pub fn email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(str::to_string);
        self
    }

    /// An empty profile is still sent as `""`; only an absent one loses its
    /// `value`.
    pub fn linkedin(mut self, linkedin: Option<&str>) -> Self {
        self.linkedin = linkedin.map(str::to_string);
        self
    }

    pub fn project_note(mut self, note: Option<&str>) -> Self {
        self.project_note = note.map(str::to_string);
        self
    }

    /// A blank profile is dropped entirely.
    pub fn github(mut self, github: Option<&str>) -> Self {
        self.github = github.filter(|g| !g.trim().is_empty()).map(str::to_string);
        self
    }

    pub fn resume(mut self, resume: ResumeAttachment) -> Self {
        self.resume = Some(resume);
        self
    }

    pub fn build(self) -> ApplicationForm {
        let mut field_submissions = vec![
            FieldSubmission::new(schema::NAME, self.name.as_deref()),
            FieldSubmission::new(schema::EMAIL, self.email.as_deref()),
            FieldSubmission::new(schema::RESUME, Some(RESUME_FILE_FIELD)),
            FieldSubmission::new(schema::LINKEDIN, self.linkedin.as_deref()),
            FieldSubmission::new(schema::PROJECT_NOTE, self.project_note.as_deref()),
        ];

        if let Some(github) = self.github.as_deref() {
            field_submissions.push(FieldSubmission::new(schema::GITHUB, Some(github)));
        }

        ApplicationForm {
            job_posting_id: self.job_posting_id,
            field_submissions,
            resume: self.resume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn upload(name: Option<&str>) -> ResumeUpload {
        ResumeUpload {
            data: Some("JVBERi0xLjc=".to_string()),
            name: name.map(str::to_string),
            mime_type: Some("application/pdf".to_string()),
        }
    }

    fn request(github: Option<&str>) -> ApplicationRequest {
        ApplicationRequest {
            job_posting_id: Some("3f2b8c1e-9d4a-4b7e-8c2f-1a2b3c4d5e6f".to_string()),
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            linkedin: Some("https://linkedin.com/in/jane".to_string()),
            github: github.map(str::to_string),
            project_note: Some("Wrote a tiny database".to_string()),
            resume: Some(upload(Some("Jane CV.pdf"))),
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename(Some("Jane Doe (final).pdf")), "Jane_Doe__final_.pdf");
        assert_eq!(sanitize_filename(Some("../../etc/passwd")), ".._.._etc_passwd");
        assert_eq!(sanitize_filename(Some("résumé.docx")), "r_sum_.docx");
        assert_eq!(sanitize_filename(None), "resume.pdf");
        assert_eq!(sanitize_filename(Some("")), "resume.pdf");
    }

    #[test]
    fn test_sanitize_filename_truncates() {
        let long = format!("{}.pdf", "a".repeat(200));
        let sanitized = sanitize_filename(Some(&long));
        assert_eq!(sanitized.len(), 100);
        assert!(sanitized.chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_field_submissions_in_schema_order() {
        let form = ApplicationForm::from_request(&request(None)).unwrap();

        assert_eq!(
            form.paths(),
            vec![
                schema::NAME,
                schema::EMAIL,
                schema::RESUME,
                schema::LINKEDIN,
                schema::PROJECT_NOTE
            ]
        );
        assert_eq!(form.field_submissions[2].value.as_deref(), Some(RESUME_FILE_FIELD));
    }

    #[test]
    fn test_github_path_present_only_when_supplied() {
        let blank = ApplicationForm::from_request(&request(Some("  "))).unwrap();
        assert!(!blank.paths().contains(&schema::GITHUB));

        let given =
            ApplicationForm::from_request(&request(Some("https://github.com/jane"))).unwrap();
        let last = given.field_submissions.last().unwrap();
        assert_eq!(last.path, schema::GITHUB);
        assert_eq!(last.value.as_deref(), Some("https://github.com/jane"));
    }

    #[test]
    fn test_application_form_json_omits_absent_values() {
        let form = ApplicationForm::builder("id")
            .name(Some("Jane"))
            .email(Some("jane@example.com"))
            .project_note(Some("Wrote a tiny database"))
            .build();

        let json: Value = serde_json::from_str(&form.application_form_json()).unwrap();
        let linkedin = &json["fieldSubmissions"][3];
        assert_eq!(linkedin["path"], schema::LINKEDIN);
        assert!(linkedin.get("value").is_none());
        assert_eq!(json["fieldSubmissions"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_empty_linkedin_is_sent_as_empty_string() {
        let req = ApplicationRequest {
            linkedin: Some(String::new()),
            ..request(None)
        };
        let form = ApplicationForm::from_request(&req).unwrap();

        let json: Value = serde_json::from_str(&form.application_form_json()).unwrap();
        let linkedin = &json["fieldSubmissions"][3];
        assert_eq!(linkedin["path"], schema::LINKEDIN);
        assert_eq!(linkedin["value"], "");
    }

    #[test]
    fn test_attachment_is_decoded_and_named() {
        let form = ApplicationForm::from_request(&request(None)).unwrap();
        let resume = form.resume.unwrap();

        assert_eq!(resume.bytes, b"%PDF-1.7");
        assert_eq!(resume.file_name, "Jane_CV.pdf");
        assert_eq!(resume.mime_type, "application/pdf");
    }

    #[test]
    fn test_attachment_recheck_rejects_bad_type() {
        let upload = ResumeUpload {
            mime_type: Some("application/x-msdownload".to_string()),
            ..upload(Some("cv.exe"))
        };
        assert!(matches!(
            ResumeAttachment::from_upload(&upload),
            Err(ProxyError::ResumeProcessing(_))
        ));
    }

    #[test]
    fn test_into_multipart() {
        let form = ApplicationForm::from_request(&request(None)).unwrap();
        let multipart = form.into_multipart().unwrap();
        assert!(!multipart.boundary().is_empty());
    }
}
