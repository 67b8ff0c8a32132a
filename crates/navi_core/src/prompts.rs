//! Fixed bot lines. Lines that mention the user are built by the functions
//! at the bottom.

pub const GREETING: &str = "Hello, I'm Navi, your AI assistant to help navigate your life in the USA. \
Tell me about yourself. What is your name?";

pub const ARRIVAL_AND_VISA_QUESTION: &str =
    "When did you come to the USA and what's your current visa status?";

pub const SERVICE_QUESTION: &str =
    "That's good to hear. May I know which of these services you are looking for today?";

pub const SERVICE_AGAIN_QUESTION: &str = "Sure. Which of these services can I help you with?";
pub const PICK_A_SERVICE: &str = "Please choose one of the services below.";

pub const JOB_TYPE_QUESTION: &str = "What kind of job are you looking for?";
pub const SKILLS_QUESTION: &str = "Do you have any relevant skills or experience?";
pub const WORK_LOCATION_QUESTION: &str = "Which city or area would you prefer to work in?";
pub const SALARY_QUESTION: &str =
    "Do you have any expectations from the job like salary, transport or any benefits?";
pub const JOB_CLOSING_QUESTION: &str =
    "Understood. Is there anything else you would like to add before I find suitable jobs for you?";
pub const JOB_LOADING: &str =
    "Please give me some time to search my knowledge base and find the best recommended jobs for you.";

pub const HOUSEHOLD_QUESTION: &str =
    "Let us find the best house for you together. May I know about the household members?";
pub const HOME_LOCATION_QUESTION: &str =
    "Can you provide the neighbourhood and the city you would like to live in?";
pub const PETS_QUESTION: &str = "Do you have any pets?";
pub const RENT_QUESTION: &str = "What's your maximum rent budget?";
pub const HOUSING_PREFERENCES_QUESTION: &str = "Any housing preferences you have?";
pub const HOUSING_LOADING: &str = "Let me find the best matching housing for you.";

pub const JOB_LOADING_STEPS: &[&str] = &[
    "Extracting your information...",
    "Checking files...",
    "Extracted information.",
    "Searching for relevant jobs...",
    "Searching through knowledge graphs...",
    "Finding recommendations...",
];

pub const HOUSING_LOADING_STEPS: &[&str] = &[
    "Extracting your information...",
    "Checking files...",
    "Extracted information.",
    "Searching for relevant housing...",
    "Searching through knowledge graphs...",
    "Finding recommendations...",
];

pub const HOUSING_SAVED: &str =
    "Great! I have saved your housing preference. You can find it in the housing section.";
pub const FOLLOW_UP_OFFER: &str = "Would you like help with any other services today?";
pub const RESULTS_HINT: &str =
    "You can save one of these listings, or ask me to fill an application for it.";
pub const FAREWELL: &str =
    "Thank you for talking with me. I'm here whenever you need help again.";

pub const DOCUMENT_PROCESSED: &str =
    "I've processed your uploaded document. Let me continue with the questions.";

pub const AUTOFILL_STARTED: &str = "Please wait while I fill the application...";
pub const AUTOFILL_REQUIRED: &str =
    "Let me autofill an application first, then you can download it.";
pub const DOCUMENT_FAILED: &str =
    "I couldn't save the application document. Please try downloading it again.";

pub const AUDIO_MESSAGE_LABEL: &str = "Audio message";
pub const TRANSCRIPTION_PLACEHOLDER: &str = "Transcription unavailable";

pub const MIC_UNSUPPORTED: &str = "Audio recording is not supported on this device.";
pub const MIC_DENIED: &str = "Microphone access was denied. Please allow microphone access \
in your settings to use voice recording.";
pub const MIC_NOT_FOUND: &str =
    "No microphone found. Please connect a microphone to use voice recording.";
pub const MIC_FAILED: &str =
    "Unable to start recording. Please check your microphone settings.";
pub const SPEECH_UNAVAILABLE: &str =
    "Voice playback is not available here, so I'll continue in text only.";

pub fn nice_to_meet(name: &str) -> String {
    format!("Hello {name}, nice to meet you. Where are you from?")
}

pub fn uploaded(file_name: &str) -> String {
    format!("Uploaded: {file_name}")
}

pub fn service_unavailable(label: &str) -> String {
    format!("{label} is not available yet. Please pick Job Search or Housing Search for now.")
}

pub fn job_results(name: &str) -> String {
    format!("Thank you for waiting, {name}. Here are the top recommended jobs for you:")
}

pub fn housing_results(name: &str) -> String {
    format!(
        "Thank you for waiting, {name}. Here are apartments and houses that match your preferences:"
    )
}

pub fn job_saved(name: &str) -> String {
    format!(
        "I have saved the job, {name}. You will be able to find it in the job section in the menu."
    )
}

pub fn autofill_completed(title: &str) -> String {
    format!(
        "Application completed! Your application for {title} has been autofilled with your profile information."
    )
}

pub fn document_saved(file_name: &str) -> String {
    format!("Your application has been saved as {file_name}.")
}
