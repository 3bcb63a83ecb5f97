mod test_capture_flow;
mod test_gemini_client;
