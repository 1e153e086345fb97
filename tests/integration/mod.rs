mod controller_loop;
