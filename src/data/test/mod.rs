mod spam_tracker;
