mod scroll_tests;
