pub mod ask_question_command;
