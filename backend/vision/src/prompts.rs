//! Fixed natural-language instructions, one per endpoint family.

pub const PLASTIC_GARBAGE: &str = "Is this image showing plastic garbage? \
    Respond only with 'YES' or 'NO' followed by a confidence percentage.";

pub const DISPOSAL_SYSTEM: &str = "You are an AI assistant that analyzes \
    sequences of images to verify proper garbage disposal. Look for evidence \
    of someone properly disposing of garbage in a bin across the frames.";

pub const DISPOSAL_ANALYSIS: &str = "These are 4 sequential frames from a \
    video. Does it show someone properly disposing garbage in a bin? Describe \
    what you see and provide a YES/NO conclusion with confidence percentage.";

pub const AADHAR_NUMBER: &str = "Extract and return only the 12-digit Aadhar \
    number from this image. Return only the number, no other text.";

pub const BARCODE_VALUE: &str = "Read and return only the barcode value from \
    this image. Return only the decoded value, no other text.";
