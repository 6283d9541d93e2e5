mod buffer_test;
