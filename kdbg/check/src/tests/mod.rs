mod checker_test;
