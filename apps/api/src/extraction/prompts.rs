// Prompt for transcribing document images. Sent together with the image as inline data.

pub const IMAGE_TRANSCRIPTION_PROMPT: &str = "Ekstrak semua teks yang ada dalam gambar ini. \
Berikan teks lengkap persis seperti yang terlihat dalam dokumen, \
pertahankan struktur dan format sebisa mungkin. Fokus pada keterbacaan dan akurasi.";
